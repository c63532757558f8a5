//! Reason-and-act agent: an explicit state machine over the transcript.
//!
//! One round is reason → (route) → execute tools → reason again; the machine
//! terminates when a reasoning step produces no tool calls. There is no turn
//! cap: termination is the routing predicate's job alone.

use std::sync::Arc;

use tracing::debug;

use crate::agent::{route_after_reason, Responder, Step};
use crate::error::AgentError;
use crate::llm::ChatModel;
use crate::message::Message;
use crate::tools;
use crate::transcript::Transcript;

/// System instruction prefixed to every reasoning step of the agent.
pub const REACT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Executes the pending tool calls of the latest assistant entry.
///
/// Dispatches each call in issue order and appends one tool-result entry per
/// call, carrying the stringified value and the originating call id. Any
/// dispatch failure aborts the turn with that error; results of earlier calls
/// in the batch stay appended.
pub fn execute_tools(mut transcript: Transcript) -> Result<Transcript, AgentError> {
    let calls = transcript
        .last()
        .map(|m| m.tool_calls().to_vec())
        .unwrap_or_default();
    debug!(call_count = calls.len(), "executing pending tool calls");

    for call in &calls {
        let value = tools::dispatch(&call.name, &call.arguments)?;
        transcript.push(Message::tool(call.id.clone(), value.to_string()));
    }
    Ok(transcript)
}

/// Reason-and-act agent over the calculator tool set.
///
/// Drives the [`Step`] machine: `Reasoning` invokes the model (system
/// instruction prefixed, tools bound by the caller on the model client),
/// `ToolExecution` dispatches the pending calls and loops back, `Terminated`
/// stops. State in, state out; the final assistant entry is the reply.
pub struct ReactAgent {
    responder: Responder,
}

impl ReactAgent {
    /// Creates the agent; bind the calculator specs on `model` so it can
    /// request calls (see [`MathOp::specs`](crate::tools::MathOp::specs)).
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            responder: Responder::new(model).with_system(REACT_SYSTEM_PROMPT),
        }
    }

    /// Runs the machine to termination from an initial transcript.
    pub async fn run(&self, transcript: Transcript) -> Result<Transcript, AgentError> {
        let mut state = transcript;
        let mut step = Step::Reasoning;
        loop {
            match step {
                Step::Reasoning => {
                    state = self.responder.respond(state).await?;
                    step = route_after_reason(&state);
                    debug!(next = ?step, messages = state.len(), "reasoning step done");
                }
                Step::ToolExecution => {
                    state = execute_tools(state)?;
                    step = Step::Reasoning;
                }
                Step::Terminated => break,
            }
        }
        Ok(state)
    }

    /// Runs one fresh turn for `input` and returns the final reply.
    pub async fn answer(&self, input: &str) -> Result<String, AgentError> {
        let state = self.run(Transcript::from(vec![Message::user(input)])).await?;
        Ok(state.last_reply().unwrap_or_default().to_string())
    }
}
