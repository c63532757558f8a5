//! Calculator agent: reason → execute tools → reason → END.
//!
//! Runs the reason-and-act machine over one user message; a ScriptedModel
//! requests an `add` call, the dispatcher computes it, and the second
//! reasoning step turns the result into the final reply. No API key needed.
//!
//! Run: `cargo run -p banter-examples --example calculator -- "Add 34+54"`

use std::env;
use std::sync::Arc;

use banter::{Message, ReactAgent, ScriptedModel, ToolCall, Transcript};

#[tokio::main]
async fn main() {
    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| "Add 34+54".to_string());

    let model = Arc::new(ScriptedModel::first_calls_then_reply(
        vec![ToolCall::new("call-1", "add", r#"{"a": 34, "b": 54}"#)],
        "34 + 54 = 88",
    ));
    let agent = ReactAgent::new(model);

    match agent.run(Transcript::from(vec![Message::user(input)])).await {
        Ok(state) => {
            for m in state.iter() {
                match m {
                    Message::System(x) => println!("[System] {}", x),
                    Message::User(x) => println!("[User] {}", x),
                    Message::Assistant { content, .. } => println!("[Assistant] {}", content),
                    Message::Tool { call_id, content } => {
                        println!("[Tool {}] {}", call_id, content)
                    }
                }
            }
            if state.last_reply().is_none() {
                eprintln!("no assistant reply");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
