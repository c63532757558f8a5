//! Admission gate: reject inputs shorter than the minimum length.

use tracing::warn;

use crate::transcript::Transcript;

/// Minimum input length, counted in characters after trimming whitespace.
pub const MIN_INPUT_LEN: usize = 5;

/// Gate decision for the latest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Input is long enough; run the reasoning step.
    Process,
    /// Input is too short; end the turn without invoking the model.
    Reject,
}

/// Examines only the most recent entry: trimmed content shorter than
/// [`MIN_INPUT_LEN`] characters is rejected. An empty transcript rejects.
pub fn admit(transcript: &Transcript) -> Admission {
    let Some(last) = transcript.last() else {
        return Admission::Reject;
    };
    let len = last.content().trim().chars().count();
    if len < MIN_INPUT_LEN {
        warn!(len, "input below minimum length, rejecting turn");
        Admission::Reject
    } else {
        Admission::Process
    }
}
