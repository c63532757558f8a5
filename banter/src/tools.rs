//! Calculator tool set: a closed enum of arithmetic operations.
//!
//! The operation set is fixed at compile time; dispatch is a match, not a
//! registry. [`MathOp::specs`] produces the function specs bound to the chat
//! model so it can request calls by name.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::ToolError;

/// Arithmetic operation over two 64-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A function spec advertised to the chat model.
///
/// Shape follows the Chat Completions `tools` entry: name, description, and a
/// JSON schema for the arguments object.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: serde_json::Value,
}

/// Arguments object for every operation: two integers `a` and `b`.
#[derive(Debug, Clone, Copy, Deserialize)]
struct Operands {
    a: i64,
    b: i64,
}

impl Operands {
    /// Parses the JSON arguments string from a tool call.
    fn parse(arguments: &str) -> Result<Self, ToolError> {
        serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
    }
}

impl MathOp {
    /// Every operation, in advertising order.
    pub const ALL: [MathOp; 4] = [
        MathOp::Add,
        MathOp::Subtract,
        MathOp::Multiply,
        MathOp::Divide,
    ];

    /// Wire name of this operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Resolves a wire name to an operation.
    pub fn from_name(name: &str) -> Result<Self, ToolError> {
        match name {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            other => Err(ToolError::UnknownOperation(other.to_string())),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Add => "Add two numbers",
            Self::Subtract => "Subtract two numbers",
            Self::Multiply => "Multiply two numbers",
            Self::Divide => "Divide two numbers",
        }
    }

    /// Evaluates the operation. Zero divisor and out-of-range results are
    /// signaled, never panic.
    pub fn apply(self, a: i64, b: i64) -> Result<i64, ToolError> {
        match self {
            Self::Add => a.checked_add(b).ok_or(ToolError::Overflow),
            Self::Subtract => a.checked_sub(b).ok_or(ToolError::Overflow),
            Self::Multiply => a.checked_mul(b).ok_or(ToolError::Overflow),
            Self::Divide => {
                if b == 0 {
                    Err(ToolError::DivideByZero)
                } else {
                    a.checked_div(b).ok_or(ToolError::Overflow)
                }
            }
        }
    }

    /// Function specs for the whole set, for binding to a chat model.
    pub fn specs() -> Vec<ToolSpec> {
        Self::ALL
            .iter()
            .map(|op| ToolSpec {
                name: op.name().to_string(),
                description: Some(op.description().to_string()),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "a": { "type": "integer" },
                        "b": { "type": "integer" }
                    },
                    "required": ["a", "b"]
                }),
            })
            .collect()
    }
}

/// Dispatches one tool call: resolve the name, parse arguments, evaluate.
///
/// Prints the `<name> called` diagnostic line once the call is admitted, so
/// every executed operation is visible on the console.
pub fn dispatch(name: &str, arguments: &str) -> Result<i64, ToolError> {
    let op = MathOp::from_name(name)?;
    let operands = Operands::parse(arguments)?;
    println!("{} called", op.name());
    debug!(tool = %op.name(), a = operands.a, b = operands.b, "dispatching tool call");
    op.apply(operands.a, operands.b)
}
