//! # Banter
//!
//! Small conversational agents in Rust with a **state-in, state-out** design:
//! an append-only [`Transcript`] flows through explicit steps, each step
//! returns the updated transcript, and routing between steps is a pure
//! function of the last entry. No graph interpreter; the machines are
//! hand-written matches.
//!
//! ## Main modules
//!
//! - [`message`]: `Message` roles and `ToolCall` — the entries of a transcript.
//! - [`transcript`]: `Transcript` container, `Retention` window, flat-file export.
//! - [`llm`]: `ChatModel` trait, `ChatOpenAI`, and `ScriptedModel` for tests.
//! - [`tools`]: the fixed calculator operation set (`add`, `subtract`,
//!   `multiply`, `divide`) and its function specs.
//! - [`agent`]: `Responder` (one reasoning step), `ReactAgent` (reason ⇄ tools
//!   machine), and the input admission gate.
//! - [`session`]: sentinel handling and the per-variant state policies
//!   (stateless, memory, gated).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use banter::{ChatSession, Responder, ScriptedModel};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), banter::AgentError> {
//! let model = Arc::new(ScriptedModel::with_reply("hello back"));
//! let session = ChatSession::new(Responder::new(model));
//! let reply = session.turn("hello").await?;
//! assert_eq!(reply, "hello back");
//! # Ok(())
//! # }
//! ```
//!
//! Run the offline calculator example:
//! `cargo run -p banter-examples --example calculator`

pub mod agent;
pub mod error;
pub mod llm;
pub mod message;
pub mod session;
pub mod tools;
pub mod transcript;

pub use agent::{
    admit, execute_tools, route_after_reason, Admission, ReactAgent, Responder, Step,
    MIN_INPUT_LEN, REACT_SYSTEM_PROMPT,
};
pub use error::{AgentError, ToolError};
pub use llm::{ChatModel, ChatOpenAI, ModelReply, ScriptedModel};
pub use message::{Message, ToolCall};
pub use session::{ChatSession, GatedSession, MemorySession, Sentinel};
pub use tools::{MathOp, ToolSpec};
pub use transcript::{Retention, Transcript};
