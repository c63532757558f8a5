//! Conversation sessions: loop sentinels, per-turn state policy, transcript export.
//!
//! A session owns the state policy of one console loop: [`ChatSession`] hands
//! the model a fresh single-entry transcript every turn, [`MemorySession`]
//! carries the transcript across turns, [`GatedSession`] screens input length
//! before spending a model call.

use std::path::Path;

use tracing::debug;

use crate::agent::{admit, Admission, Responder};
use crate::error::AgentError;
use crate::message::Message;
use crate::transcript::Transcript;

/// Loop terminator for a console session.
///
/// Exact sentinels compare the raw line; the case-insensitive form trims the
/// line and ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    word: String,
    relaxed: bool,
}

impl Sentinel {
    /// Sentinel that matches the raw line exactly.
    pub fn exact(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            relaxed: false,
        }
    }

    /// Sentinel that matches after trimming, ignoring ASCII case.
    pub fn case_insensitive(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            relaxed: true,
        }
    }

    /// True when `line` terminates the loop.
    pub fn matches(&self, line: &str) -> bool {
        if self.relaxed {
            line.trim().eq_ignore_ascii_case(&self.word)
        } else {
            line == self.word
        }
    }
}

/// Stateless session: every turn starts from a fresh single-entry transcript.
///
/// Prior turns never leak into the sequence passed to the model.
pub struct ChatSession {
    responder: Responder,
}

impl ChatSession {
    pub fn new(responder: Responder) -> Self {
        Self { responder }
    }

    /// Runs one turn and returns the reply.
    pub async fn turn(&self, input: &str) -> Result<String, AgentError> {
        let state = Transcript::from(vec![Message::user(input)]);
        let state = self.responder.respond(state).await?;
        Ok(state.last_reply().unwrap_or_default().to_string())
    }
}

/// Memory session: the transcript accumulates across turns.
///
/// Each turn appends the user entry, runs the flow (one or more reasoning
/// steps in order), and replaces the carried transcript with the output
/// state. The flow only ever appends, so history is chronological and
/// append-only for the whole session.
pub struct MemorySession {
    flow: Vec<Responder>,
    history: Transcript,
}

impl MemorySession {
    /// Session with a single reasoning step per turn.
    pub fn new(step: Responder) -> Self {
        Self::with_flow(vec![step])
    }

    /// Session running the given steps in order on every turn.
    ///
    /// Each step appends one assistant entry; later steps see the replies of
    /// earlier ones (e.g. a plan step followed by a summarize step).
    pub fn with_flow(flow: Vec<Responder>) -> Self {
        Self {
            flow,
            history: Transcript::new(),
        }
    }

    /// Runs one turn and returns the newest reply.
    pub async fn turn(&mut self, input: &str) -> Result<String, AgentError> {
        self.history.push(Message::user(input));
        let mut state = self.history.clone();
        for step in &self.flow {
            state = step.respond(state).await?;
        }
        self.history = state;
        debug!(history_len = self.history.len(), "memory session turn done");
        Ok(self.history.last_reply().unwrap_or_default().to_string())
    }

    /// The full accumulated transcript.
    pub fn history(&self) -> &Transcript {
        &self.history
    }

    /// Writes the accumulated transcript to `path` in the flat text format.
    pub fn write_transcript(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.history.write_text_file(path)
    }
}

/// Gated session: input must pass the admission gate before the model runs.
///
/// Like [`ChatSession`], state is fresh every turn.
pub struct GatedSession {
    responder: Responder,
}

impl GatedSession {
    pub fn new(responder: Responder) -> Self {
        Self { responder }
    }

    /// Runs one turn. `Ok(None)` means the input was rejected and the model
    /// was never invoked; the caller prints the warning and keeps looping.
    pub async fn turn(&self, input: &str) -> Result<Option<String>, AgentError> {
        let state = Transcript::from(vec![Message::user(input)]);
        match admit(&state) {
            Admission::Reject => Ok(None),
            Admission::Process => {
                let state = self.responder.respond(state).await?;
                Ok(Some(state.last_reply().unwrap_or_default().to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ModelReply, ScriptedModel};
    use std::sync::Arc;

    /// **Scenario**: exact sentinels compare the raw line; case or padding defeats them.
    #[test]
    fn exact_sentinel_matches_raw_line_only() {
        let sentinel = Sentinel::exact("exit");
        assert!(sentinel.matches("exit"));
        assert!(!sentinel.matches("Exit"));
        assert!(!sentinel.matches(" exit "));
        assert!(!sentinel.matches("quit"));
    }

    /// **Scenario**: case-insensitive sentinels trim and ignore ASCII case.
    #[test]
    fn case_insensitive_sentinel_trims_and_folds() {
        let sentinel = Sentinel::case_insensitive("exit");
        assert!(sentinel.matches("exit"));
        assert!(sentinel.matches("EXIT"));
        assert!(sentinel.matches("  Exit  "));
        assert!(!sentinel.matches("quit"));
    }

    /// **Scenario**: a stateless turn hands the model exactly one entry, the
    /// current input; earlier turns never leak in.
    #[tokio::test]
    async fn chat_session_is_stateless_between_turns() {
        let model = Arc::new(ScriptedModel::with_reply("keep going!"));
        let session = ChatSession::new(Responder::new(model.clone()));

        let first = session.turn("I'm feeling stuck").await.unwrap();
        let second = session.turn("still stuck").await.unwrap();

        assert_eq!(first, "keep going!");
        assert_eq!(second, "keep going!");

        let requests = model.requests();
        assert_eq!(requests[0], vec![Message::user("I'm feeling stuck")]);
        assert_eq!(requests[1], vec![Message::user("still stuck")]);
    }

    /// **Scenario**: a memory session accumulates entries and hands the model the
    /// full history on the next turn.
    #[tokio::test]
    async fn memory_session_accumulates_history() {
        let model = Arc::new(ScriptedModel::with_reply("nice to meet you"));
        let mut session = MemorySession::new(Responder::new(model.clone()));

        session.turn("hello").await.unwrap();
        session.turn("how are you").await.unwrap();

        let contents: Vec<&str> = session.history().iter().map(|m| m.content()).collect();
        assert_eq!(
            contents,
            ["hello", "nice to meet you", "how are you", "nice to meet you"]
        );

        let second_request = &model.requests()[1];
        assert_eq!(second_request.len(), 3, "user + reply + user");
    }

    /// **Scenario**: a two-step flow appends two assistant entries per turn and the
    /// second step sees the first step's reply.
    #[tokio::test]
    async fn two_step_flow_appends_both_replies() {
        let model = Arc::new(ScriptedModel::with_script(vec![
            ModelReply::text("Day 1: museums. Day 2: coast."),
            ModelReply::text("Two days: museums, then the coast."),
        ]));
        let plan = Responder::new(model.clone()).with_system("You are a travel planner");
        let summarize = Responder::new(model.clone()).with_system("Summarize the plan");
        let mut session = MemorySession::with_flow(vec![plan, summarize]);

        let reply = session.turn("Lisbon, 2 days").await.unwrap();

        assert_eq!(reply, "Two days: museums, then the coast.");
        assert_eq!(session.history().len(), 3, "user + plan + summary");

        let summarize_request = &model.requests()[1];
        assert!(summarize_request
            .iter()
            .any(|m| m.content().contains("Day 1: museums")));
    }

    /// **Scenario**: a rejected input never reaches the model; an admitted one does.
    #[tokio::test]
    async fn gated_session_screens_short_input() {
        let model = Arc::new(ScriptedModel::with_reply("you got this"));
        let session = GatedSession::new(Responder::new(model.clone()));

        let rejected = session.turn("test").await.unwrap();
        assert_eq!(rejected, None);
        assert_eq!(model.request_count(), 0);

        let admitted = session.turn("tests").await.unwrap();
        assert_eq!(admitted.as_deref(), Some("you got this"));
        assert_eq!(model.request_count(), 1);
    }

    /// **Scenario**: write_transcript flushes the accumulated history to disk.
    #[tokio::test]
    async fn memory_session_writes_transcript_file() {
        let model = Arc::new(ScriptedModel::with_reply("hi"));
        let mut session = MemorySession::new(Responder::new(model));
        session.turn("hello").await.unwrap();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logging.txt");
        session.write_transcript(&path).expect("write transcript");

        let text = std::fs::read_to_string(&path).expect("read back");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Your conversation history"));
        assert_eq!(lines.next(), Some("You: hello"));
    }
}
