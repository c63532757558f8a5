//! Conversation transcript: ordered, append-only message container.
//!
//! The transcript only ever grows; entries are never mutated or removed after
//! insertion. Memory sessions thread it back into each invocation, and can
//! flush it to a plain-text file at end of run (write-once, no read path).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// First line of the transcript file.
const TRANSCRIPT_HEADER: &str = "Your conversation history";
/// Prefix for user entries in the transcript file.
const USER_MARKER: &str = "You: ";
/// Prefix for assistant entries in the transcript file.
const ASSISTANT_MARKER: &str = "AI: ";
/// Closing line of the transcript file.
const TRANSCRIPT_FOOTER: &str = "End of conversation";

/// Context retention policy for memory sessions.
///
/// Bounds the window of history handed to the model on each invocation. The
/// stored transcript itself is never truncated; retention only limits the
/// view, so the append-only invariant holds whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Pass the whole history to every invocation.
    #[default]
    Unbounded,
    /// Pass at most the last `n` messages.
    LastMessages(usize),
}

/// Ordered, append-only sequence of conversation messages.
///
/// Created empty (or seeded with one user entry) at the start of a driver
/// iteration, grown by each step that produces a reply, and in the memory
/// variants carried across turns as the next invocation's input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message. The only mutation the container supports.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the chronologically last entry, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns all entries in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates entries in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the window of history selected by `retention`, newest-last.
    pub fn context(&self, retention: Retention) -> &[Message] {
        match retention {
            Retention::Unbounded => &self.messages,
            Retention::LastMessages(n) => {
                let start = self.messages.len().saturating_sub(n);
                &self.messages[start..]
            }
        }
    }

    /// Returns the content of the chronologically last assistant entry, if any.
    ///
    /// Used by sessions to surface the final reply without scanning messages.
    pub fn last_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Renders the transcript in the flat text-file format.
    ///
    /// One header line, then `You: <content>` per user entry and
    /// `AI: <content>` plus a blank line per assistant entry, in chronological
    /// order, then the closing line. System and tool entries are not written.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(TRANSCRIPT_HEADER);
        out.push('\n');
        for message in &self.messages {
            match message {
                Message::User(content) => {
                    out.push_str(USER_MARKER);
                    out.push_str(content);
                    out.push('\n');
                }
                Message::Assistant { content, .. } => {
                    out.push_str(ASSISTANT_MARKER);
                    out.push_str(content);
                    out.push_str("\n\n");
                }
                Message::System(_) | Message::Tool { .. } => {}
            }
        }
        out.push_str(TRANSCRIPT_FOOTER);
        out
    }

    /// Writes the text rendering to `path`, overwriting any previous file.
    ///
    /// The file is opened, written, and closed within this call.
    pub fn write_text_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_text())
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
