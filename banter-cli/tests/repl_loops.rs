//! End-to-end tests for the console loops, driven by in-memory input instead
//! of stdin.

use std::sync::Arc;

use tokio::io::BufReader;

use banter::{
    ChatSession, GatedSession, MemorySession, ReactAgent, Responder, ScriptedModel, Sentinel,
    ToolCall,
};
use banter_cli::repl::{run_chat_loop, run_gate_loop, run_memory_loop, run_react_loop};

/// **Scenario**: the memory loop runs turns until the sentinel, then writes the
/// transcript file; the sentinel line itself never becomes a turn.
#[tokio::test]
async fn memory_loop_writes_transcript_on_quit() {
    let model = Arc::new(ScriptedModel::with_reply("hi, nice to meet you"));
    let mut session = MemorySession::new(Responder::new(model.clone()));
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logging.txt");

    let input = BufReader::new(&b"hello\nquit\n"[..]);
    run_memory_loop(input, &mut session, &Sentinel::exact("quit"), &path, false)
        .await
        .expect("memory loop");

    assert_eq!(
        model.request_count(),
        1,
        "only the line before the sentinel is a turn"
    );

    let text = std::fs::read_to_string(&path).expect("transcript written");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Your conversation history");
    assert_eq!(lines[1], "You: hello");
    assert_eq!(lines[2], "AI: hi, nice to meet you");
    assert_eq!(lines.last(), Some(&"End of conversation"));
    assert!(!text.contains("quit"));
}

/// **Scenario**: the stateless chat sentinel is the raw line `exit`; a cased
/// variant is an ordinary message and reaches the model.
#[tokio::test]
async fn chat_loop_sentinel_is_exact() {
    let model = Arc::new(ScriptedModel::with_reply("ok"));
    let session = ChatSession::new(Responder::new(model.clone()));

    let input = BufReader::new(&b"Exit\nexit\n"[..]);
    run_chat_loop(input, &session, &Sentinel::exact("exit"))
        .await
        .expect("chat loop");

    assert_eq!(model.request_count(), 1);
    assert_eq!(model.requests()[0][0].content(), "Exit");
}

/// **Scenario**: a short line is rejected without a model call and the loop
/// keeps going; the next long line is processed; `EXIT` ends the loop.
#[tokio::test]
async fn gate_loop_rejects_then_processes_then_exits() {
    let model = Arc::new(ScriptedModel::with_reply("you got this"));
    let session = GatedSession::new(Responder::new(model.clone()));

    let input = BufReader::new(&b"test\nI'm feeling stuck\nEXIT\n"[..]);
    run_gate_loop(input, &session, &Sentinel::case_insensitive("exit"))
        .await
        .expect("gate loop");

    assert_eq!(
        model.request_count(),
        1,
        "rejected line never reaches the model"
    );
    assert_eq!(model.requests()[0][0].content(), "I'm feeling stuck");
}

/// **Scenario**: the calculator loop answers a turn (tools and all) and stops
/// cleanly at EOF without a sentinel.
#[tokio::test]
async fn react_loop_runs_turn_and_stops_at_eof() {
    let model = Arc::new(ScriptedModel::first_calls_then_reply(
        vec![ToolCall::new("c1", "add", r#"{"a": 34, "b": 54}"#)],
        "34 + 54 = 88",
    ));
    let agent = ReactAgent::new(model.clone());

    let input = BufReader::new(&b"Add 34+54\n"[..]);
    run_react_loop(input, &agent, &Sentinel::exact("exit"))
        .await
        .expect("react loop");

    assert_eq!(model.request_count(), 2, "reason, tools, reason again");
}
