//! Memory session: history accumulates across turns and lands in a transcript file.
//!
//! Two scripted turns, then the transcript is written in the flat text format
//! the memory agents save on exit. No API key needed.
//!
//! Run: `cargo run -p banter-examples --example scripted_chat -- transcript.txt`

use std::env;
use std::sync::Arc;

use banter::{MemorySession, ModelReply, Responder, ScriptedModel};

#[tokio::main]
async fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "transcript.txt".to_string());

    let model = Arc::new(ScriptedModel::with_script(vec![
        ModelReply::text("Hi! How can I help?"),
        ModelReply::text("18, if you were born in 2008."),
    ]));
    let mut session = MemorySession::new(Responder::new(model));

    for input in ["hello", "I was born in 2008, how old am I in 2026?"] {
        match session.turn(input).await {
            Ok(reply) => println!("You: {}\nAI: {}\n", input, reply),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = session.write_transcript(&path) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    println!("Your conversation history is saved in {}", path);
}
