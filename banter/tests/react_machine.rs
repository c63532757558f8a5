//! Integration test: reason-and-act machine from user input to final reply.
//!
//! Drives the full machine through the public API with a scripted model; no
//! real API.

use std::sync::Arc;

use banter::{
    AgentError, Message, ReactAgent, ScriptedModel, ToolCall, ToolError, Transcript,
    REACT_SYSTEM_PROMPT,
};

#[tokio::test]
async fn react_machine_user_to_tool_results_to_reply() {
    let model = Arc::new(ScriptedModel::first_calls_then_reply(
        vec![
            ToolCall::new("call-1", "add", r#"{"a": 34, "b": 54}"#),
            ToolCall::new("call-2", "multiply", r#"{"a": 2, "b": 3}"#),
        ],
        "34+54 is 88 and 2*3 is 6.",
    ));
    let agent = ReactAgent::new(model.clone());

    let out = agent
        .run(Transcript::from(vec![Message::user(
            "Add 34+54. Also multiply 2 by 3.",
        )]))
        .await
        .unwrap();

    // reason: user -> user + assistant(two calls)
    // tools: one result per call, in issue order
    // reason again: final assistant reply, no calls -> terminated
    assert_eq!(out.len(), 5);
    assert!(matches!(&out.messages()[0], Message::User(_)));
    assert_eq!(out.messages()[1].tool_calls().len(), 2);
    assert_eq!(out.messages()[2], Message::tool("call-1", "88"));
    assert_eq!(out.messages()[3], Message::tool("call-2", "6"));
    assert_eq!(out.last_reply(), Some("34+54 is 88 and 2*3 is 6."));

    // Two model calls; both saw the system instruction first, and the second
    // saw the tool results.
    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0][0], Message::system(REACT_SYSTEM_PROMPT));
    assert_eq!(requests[1].len(), 5);
    assert!(requests[1]
        .iter()
        .any(|m| matches!(m, Message::Tool { content, .. } if content == "88")));
}

/// A turn whose single call divides by zero fails with the domain error and
/// makes no further model calls.
#[tokio::test]
async fn react_machine_divide_by_zero_aborts_run() {
    let model = Arc::new(ScriptedModel::first_calls_then_reply(
        vec![ToolCall::new("call-1", "divide", r#"{"a": 7, "b": 0}"#)],
        "unreachable",
    ));
    let agent = ReactAgent::new(model.clone());

    let result = agent.answer("What is 7 divided by 0?").await;

    assert!(matches!(
        result,
        Err(AgentError::Tool(ToolError::DivideByZero))
    ));
    assert_eq!(model.request_count(), 1);
}
