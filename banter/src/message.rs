//! Message types for conversation state.
//!
//! Roles: System (instruction, usually prefixed at invocation), User, Assistant
//! (may carry tool calls), Tool (result of one tool call). Used by
//! [`Transcript`](crate::transcript::Transcript) and by every agent step.

use serde::{Deserialize, Serialize};

/// A single tool invocation requested by the model.
///
/// `arguments` is a JSON object string exactly as returned by the Chat
/// Completions API; parse it when executing the call. `id` correlates the
/// eventual [`Message::Tool`] result with this call.
///
/// **Interaction**: Written into `Message::Assistant` by the reasoning step;
/// read by `execute_tools` to dispatch a [`MathOp`](crate::tools::MathOp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id from the model; echoed back on the matching tool result.
    pub id: String,
    /// Operation name (e.g. "add").
    pub name: String,
    /// Arguments as a JSON object string; parse when calling the tool.
    pub arguments: String,
}

impl ToolCall {
    /// Creates a tool call.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A single message in the conversation.
///
/// An assistant entry with an empty `tool_calls` list is a terminal reply for
/// the turn; a non-empty list routes the turn into tool execution. A tool
/// entry references the call it answers via `call_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// System instruction; prefixed at invocation time, not stored by agents.
    System(String),
    /// User input.
    User(String),
    /// Model reply, optionally requesting tool calls.
    Assistant {
        content: String,
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one executed tool call.
    Tool { call_id: String, content: String },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant reply with no tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Creates an assistant reply carrying tool calls.
    pub fn assistant_with_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Creates a tool-result message for the given call id.
    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            call_id: call_id.into(),
            content: content.into(),
        }
    }

    /// Returns the textual content of this message, whatever the role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) => s,
            Self::Assistant { content, .. } => content,
            Self::Tool { content, .. } => content,
        }
    }

    /// Returns the tool calls pending on this message (empty for non-assistant roles).
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}
