//! Banter CLI binary: run one of the console agents from the command line.
//!
//! Subcommands: `chat` (stateless), `memory` (accumulated history + transcript
//! file), `planner` (plan then summarize per turn), `react` (calculator
//! agent), `gate` (length-gated motivational quotes).

use std::path::PathBuf;
use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use banter::{
    ChatModel, ChatOpenAI, ChatSession, GatedSession, MathOp, MemorySession, ReactAgent,
    Responder, Retention, Sentinel,
};
use banter_cli::{logging, repl};

/// Model shared by every agent variant.
const MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for the chat and gate variants.
const CHAT_TEMPERATURE: f32 = 0.5;

/// Sampling temperature for the memory and planner variants.
const MEMORY_TEMPERATURE: f32 = 0.0;

/// Env variable holding the API key for the chat and react variants.
const CHAT_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Env variable holding the API key for the memory and planner variants.
const MEMORY_API_KEY_VAR: &str = "OPEN_AI_API_KEY";

/// Env variable holding the API key for the gate variant.
const GATE_API_KEY_VAR: &str = "OPEN_AI_KEY";

/// System instruction for the planner's plan step.
const PLANNER_SYSTEM_PROMPT: &str = "You are a travel planner who has travelled to all countries. Based on user input, make a detailed trip plan.";

/// System instruction for the planner's summarize step.
const SUMMARIZE_SYSTEM_PROMPT: &str = "Summarize the above trip plan in 2-3 lines.";

#[derive(Parser, Debug)]
#[command(name = "banter")]
#[command(about = "Banter — console agents over the OpenAI chat API")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Stateless chat: every turn starts from a fresh state (type `exit`)
    Chat,
    /// Memory chat: history accumulates, transcript saved on exit (type `exit`)
    Memory(MemoryArgs),
    /// Trip planner: plan then summarize per turn, transcript saved (type `quit`)
    Planner(MemoryArgs),
    /// Calculator agent: reason-and-act over add/subtract/multiply/divide
    React(ReactArgs),
    /// Motivational quotes behind an input-length gate (type `exit`)
    Gate,
}

#[derive(clap::Args, Debug, Clone)]
struct MemoryArgs {
    /// File the transcript is written to when the loop ends
    #[arg(long, value_name = "FILE", default_value = "logging.txt")]
    transcript: PathBuf,

    /// Send only the last N history entries to the model (0 = all)
    #[arg(long, value_name = "N", default_value_t = 0)]
    keep_last: usize,
}

#[derive(clap::Args, Debug, Clone)]
struct ReactArgs {
    /// One-shot message: answer it and exit instead of looping
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,
}

/// Client config for one variant; `var` names the env variable holding the key.
///
/// When the variable is unset the default config applies (async-openai falls
/// back to `OPENAI_API_KEY`); a missing key surfaces on the first call, not here.
fn openai_config(var: &str) -> OpenAIConfig {
    match std::env::var(var) {
        Ok(key) => OpenAIConfig::new().with_api_key(key),
        Err(_) => OpenAIConfig::new(),
    }
}

/// Maps the `--keep-last` flag to a retention policy. 0 means unbounded.
fn retention(keep_last: usize) -> Retention {
    if keep_last == 0 {
        Retention::Unbounded
    } else {
        Retention::LastMessages(keep_last)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init()?;

    let args = Args::parse();
    let stdin = BufReader::new(tokio::io::stdin());

    match args.cmd {
        Command::Chat => {
            let model = ChatOpenAI::with_config(openai_config(CHAT_API_KEY_VAR), MODEL)
                .with_temperature(CHAT_TEMPERATURE);
            let session = ChatSession::new(Responder::new(Arc::new(model)));
            repl::run_chat_loop(stdin, &session, &Sentinel::exact("exit")).await
        }
        Command::Memory(margs) => {
            let model = ChatOpenAI::with_config(openai_config(MEMORY_API_KEY_VAR), MODEL)
                .with_temperature(MEMORY_TEMPERATURE);
            let step = Responder::new(Arc::new(model)).with_retention(retention(margs.keep_last));
            let mut session = MemorySession::new(step);
            repl::run_memory_loop(
                stdin,
                &mut session,
                &Sentinel::exact("exit"),
                &margs.transcript,
                true,
            )
            .await
        }
        Command::Planner(margs) => {
            let model: Arc<dyn ChatModel> = Arc::new(
                ChatOpenAI::with_config(openai_config(MEMORY_API_KEY_VAR), MODEL)
                    .with_temperature(MEMORY_TEMPERATURE),
            );
            let plan = Responder::new(model.clone())
                .with_system(PLANNER_SYSTEM_PROMPT)
                .with_retention(retention(margs.keep_last));
            let summarize = Responder::new(model)
                .with_system(SUMMARIZE_SYSTEM_PROMPT)
                .with_retention(retention(margs.keep_last));
            let mut session = MemorySession::with_flow(vec![plan, summarize]);
            repl::run_memory_loop(
                stdin,
                &mut session,
                &Sentinel::exact("quit"),
                &margs.transcript,
                false,
            )
            .await
        }
        Command::React(rargs) => {
            let model = ChatOpenAI::with_config(openai_config(CHAT_API_KEY_VAR), MODEL)
                .with_tools(MathOp::specs());
            let agent = ReactAgent::new(Arc::new(model));
            if let Some(message) = rargs.message {
                let reply = agent.answer(&message).await?;
                println!("AI: {}", reply);
                return Ok(());
            }
            repl::run_react_loop(stdin, &agent, &Sentinel::exact("exit")).await
        }
        Command::Gate => {
            let model = ChatOpenAI::with_config(openai_config(GATE_API_KEY_VAR), MODEL)
                .with_temperature(CHAT_TEMPERATURE);
            let session = GatedSession::new(Responder::new(Arc::new(model)));
            repl::run_gate_loop(stdin, &session, &Sentinel::case_insensitive("exit")).await
        }
    }
}
