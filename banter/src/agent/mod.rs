//! Agent flows: single reasoning step, reason-and-act machine, admission gate.
//!
//! Flows are hand-written state machines over [`Transcript`]: each step takes
//! the state, returns the updated state, and the next step is decided by a
//! pure routing function of the last entry. No interpreter, no node registry.

mod gate;
mod react;
mod respond;

pub use gate::{admit, Admission, MIN_INPUT_LEN};
pub use react::{execute_tools, ReactAgent, REACT_SYSTEM_PROMPT};
pub use respond::Responder;

use crate::message::Message;
use crate::transcript::Transcript;

/// Steps of the reason-and-act machine.
///
/// Transitions: `Reasoning` routes via [`route_after_reason`];
/// `ToolExecution` always returns to `Reasoning`; `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Invoke the model over the current transcript.
    Reasoning,
    /// Execute the pending tool calls of the latest assistant entry.
    ToolExecution,
    /// Stop; the last assistant entry is the final reply.
    Terminated,
}

/// Routing after a reasoning step: a pure function of the last entry only.
///
/// An assistant entry with pending tool calls routes to tool execution;
/// anything else, including an empty transcript, terminates.
pub fn route_after_reason(transcript: &Transcript) -> Step {
    match transcript.last() {
        Some(Message::Assistant { tool_calls, .. }) if !tool_calls.is_empty() => {
            Step::ToolExecution
        }
        _ => Step::Terminated,
    }
}
