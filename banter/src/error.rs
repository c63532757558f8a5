//! Error types for agent steps and tool dispatch.
//!
//! No retry or recovery anywhere: a failed step returns its error through `?`
//! and the whole turn fails with it.

use thiserror::Error;

/// Tool dispatch error.
///
/// Returned by [`MathOp`](crate::tools::MathOp) parsing and evaluation.
/// Division by zero is a signaled domain error, not a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The model requested an operation outside the fixed set.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Call arguments did not parse as `{ "a": int, "b": int }`.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Divisor was zero.
    #[error("division by zero")]
    DivideByZero,

    /// Result does not fit in a 64-bit integer.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Agent step failure.
///
/// Returned by the reasoning and tool-execution steps. The driver treats any
/// variant as fatal for the run.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Model call failed (request build, transport, or empty response).
    #[error("model call failed: {0}")]
    Model(String),

    /// Tool dispatch failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}
