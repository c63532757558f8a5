//! Chat model abstraction shared by every agent variant.
//!
//! Agent steps depend on a callable that turns a message list into assistant
//! text plus optional tool calls; this module defines the trait, the OpenAI
//! implementation, and a scripted implementation for tests and examples.

mod openai;
mod scripted;

pub use openai::ChatOpenAI;
pub use scripted::ScriptedModel;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};

/// One model completion: assistant text and any requested tool calls.
///
/// **Interaction**: Returned by [`ChatModel::invoke`]; the reasoning step
/// appends it to the transcript as one assistant entry.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool calls for this turn; empty means the turn is a terminal reply.
    pub tool_calls: Vec<ToolCall>,
}

impl ModelReply {
    /// Creates a plain text reply with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Creates a reply that requests the given tool calls.
    pub fn with_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
        }
    }
}

/// Chat model client: given messages, returns assistant text and tool calls.
///
/// One blocking-style call per turn; no streaming, no retry. Implementations:
/// [`ChatOpenAI`] (real API) and [`ScriptedModel`] (canned replies).
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Invoke one completion over the given messages.
    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, AgentError>;
}
