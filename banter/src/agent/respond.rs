//! Responder: the single reasoning step shared by every variant.

use std::sync::Arc;

use tracing::debug;

use crate::error::AgentError;
use crate::llm::ChatModel;
use crate::message::Message;
use crate::transcript::{Retention, Transcript};

/// One reasoning step: invoke the model over the transcript, append the reply.
///
/// The optional system instruction is prefixed to the model input on every
/// invocation but never stored in the transcript. Retention bounds the
/// history window handed to the model; the transcript itself is untouched.
/// Appends exactly one assistant entry per call, carrying any tool calls the
/// model requested. Model failures surface unchanged.
pub struct Responder {
    model: Arc<dyn ChatModel>,
    system: Option<String>,
    retention: Retention,
}

impl Responder {
    /// Creates a responder with no system instruction and unbounded retention.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            system: None,
            retention: Retention::Unbounded,
        }
    }

    /// Set the system instruction prefixed to every invocation.
    pub fn with_system(mut self, prompt: impl Into<String>) -> Self {
        self.system = Some(prompt.into());
        self
    }

    /// Set the history window handed to the model.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Runs one reasoning step: state in, state out plus one assistant entry.
    pub async fn respond(&self, mut transcript: Transcript) -> Result<Transcript, AgentError> {
        let window = transcript.context(self.retention);
        let mut request: Vec<Message> = Vec::with_capacity(window.len() + 1);
        if let Some(system) = &self.system {
            request.push(Message::system(system.clone()));
        }
        request.extend_from_slice(window);

        debug!(
            message_count = request.len(),
            has_system = self.system.is_some(),
            "responder invoking model"
        );
        let reply = self.model.invoke(&request).await?;
        debug!(
            reply_len = reply.content.len(),
            tool_calls = reply.tool_calls.len(),
            "responder got reply"
        );

        transcript.push(Message::Assistant {
            content: reply.content,
            tool_calls: reply.tool_calls,
        });
        Ok(transcript)
    }
}
