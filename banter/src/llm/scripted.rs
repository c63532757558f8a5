//! Scripted model for tests and examples.
//!
//! Returns canned replies in order (or one fixed reply forever) and records
//! every request it receives, so tests can assert on exactly what an agent
//! sent to the model.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{ChatModel, ModelReply};
use crate::message::{Message, ToolCall};

/// Scripted chat model: canned replies, recorded requests.
///
/// Two modes: a fixed reply returned on every call, or an ordered script
/// consumed one reply per call (invoking past the end is an error, which
/// catches agents that call the model more often than expected).
///
/// **Interaction**: Implements `ChatModel`; used wherever tests or examples
/// need a flow without the real API.
pub struct ScriptedModel {
    fixed: Option<ModelReply>,
    script: Mutex<VecDeque<ModelReply>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedModel {
    /// Creates a model that returns `content` (no tool calls) on every call.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self {
            fixed: Some(ModelReply::text(content)),
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a model that returns the given replies in order, then errors.
    pub fn with_script(replies: Vec<ModelReply>) -> Self {
        Self {
            fixed: None,
            script: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a two-step script: first a reply carrying `calls`, then a
    /// plain final reply. The shape of one reason → tools → reason round.
    pub fn first_calls_then_reply(calls: Vec<ToolCall>, final_content: impl Into<String>) -> Self {
        Self::with_script(vec![
            ModelReply::with_calls("", calls),
            ModelReply::text(final_content),
        ])
    }

    /// Snapshot of every message list passed to `invoke`, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        lock_clean(&self.requests).clone()
    }

    /// Number of calls made so far.
    pub fn request_count(&self) -> usize {
        lock_clean(&self.requests).len()
    }
}

/// Locks a mutex, recovering the guard if a test thread panicked while holding it.
fn lock_clean<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(&self, messages: &[Message]) -> Result<ModelReply, AgentError> {
        lock_clean(&self.requests).push(messages.to_vec());

        if let Some(reply) = &self.fixed {
            return Ok(reply.clone());
        }
        lock_clean(&self.script)
            .pop_front()
            .ok_or_else(|| AgentError::Model("scripted model: script exhausted".to_string()))
    }
}
