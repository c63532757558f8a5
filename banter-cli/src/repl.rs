//! Console loops: read a line, run a session turn, print the reply, repeat.
//!
//! Every loop exits on EOF (Ctrl+D) or on its sentinel word. Loops are generic
//! over the reader so tests can drive them with in-memory input instead of
//! stdin. A turn error ends the run: it propagates out of the loop unhandled.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use banter::{ChatSession, GatedSession, MemorySession, ReactAgent, Sentinel};

const GATE_DIVIDER: &str = "------------------------------------------------";

/// Prints a prompt without a trailing newline and flushes it out.
fn prompt(text: &str) -> std::io::Result<()> {
    print!("{}", text);
    std::io::stdout().flush()
}

/// Runs the stateless chat loop.
///
/// Prompts `You: ` for the opening line and `Enter: ` after each reply.
/// Exits on EOF or the sentinel; the sentinel line is never sent to the model.
pub async fn run_chat_loop<R>(
    input: R,
    session: &ChatSession,
    sentinel: &Sentinel,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = input.lines();
    let mut prompt_text = "You: ";

    loop {
        prompt(prompt_text)?;
        let line = match reader.next_line().await? {
            None => break,
            Some(s) if sentinel.matches(&s) => break,
            Some(s) => s,
        };
        prompt_text = "Enter: ";

        let reply = session.turn(&line).await?;
        println!("\nAI: {}", reply);
    }
    Ok(())
}

/// Runs a memory loop: history accumulates across turns and is written to
/// `transcript_path` when the loop ends.
///
/// `echo_replies` controls whether each turn's reply is printed; the planner
/// flow stays silent per turn and only the saved transcript shows its output.
pub async fn run_memory_loop<R>(
    input: R,
    session: &mut MemorySession,
    sentinel: &Sentinel,
    transcript_path: &Path,
    echo_replies: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = input.lines();

    loop {
        prompt("\nYou: ")?;
        let line = match reader.next_line().await? {
            None => break,
            Some(s) if sentinel.matches(&s) => break,
            Some(s) => s,
        };

        let reply = session.turn(&line).await?;
        if echo_replies {
            println!("\nAI: {}", reply);
        }
    }

    session.write_transcript(transcript_path)?;
    println!(
        "Your conversation history is saved in {}",
        transcript_path.display()
    );
    Ok(())
}

/// Runs the calculator agent loop: each line is a fresh turn for the
/// reason-and-act machine.
pub async fn run_react_loop<R>(
    input: R,
    agent: &ReactAgent,
    sentinel: &Sentinel,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = input.lines();

    loop {
        prompt("You: ")?;
        let line = match reader.next_line().await? {
            None => break,
            Some(s) if sentinel.matches(&s) => break,
            Some(s) => s,
        };

        let reply = agent.answer(&line).await?;
        println!("AI: {}", reply);
    }
    Ok(())
}

/// Runs the gated quote loop.
///
/// A rejected line prints the short-message notice and the loop keeps
/// prompting; only the sentinel (or EOF) ends it.
pub async fn run_gate_loop<R>(
    input: R,
    session: &GatedSession,
    sentinel: &Sentinel,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    println!("Welcome to the Motivational Quote Agent");
    println!("Type your mood or issue (e.g., 'I'm feeling stuck') or type 'exit' to quit.");

    let mut reader = input.lines();

    loop {
        prompt("\nYou: ")?;
        let line = match reader.next_line().await? {
            None => break,
            Some(s) if sentinel.matches(&s) => {
                println!("Goodbye!");
                break;
            }
            Some(s) => s,
        };

        match session.turn(&line).await? {
            Some(reply) => {
                println!("\nAI: {}", reply);
                println!("{}", GATE_DIVIDER);
            }
            None => println!("Message too short. Ending conversation."),
        }
    }
    Ok(())
}
