//! End-to-end tests driving a session the way the REPL does.

use abacus::repl::drive;
use abacus::{HistorySnapshot, OperationRegistry, ReplState, Reply, Session, SnapshotFormat};
use std::fs;

fn session() -> Session {
    Session::new(OperationRegistry::standard())
}

fn output(text: &str) -> Reply {
    Reply::Output(text.to_string())
}

#[test]
fn arithmetic_walkthrough() {
    let mut session = session();

    assert_eq!(session.handle_line("add 2 3"), output("add(2, 3) = 5"));
    assert_eq!(session.handle_line("subtract 10 4 1"), output("subtract(10, 4, 1) = 5"));
    assert_eq!(session.handle_line("multiply 1.5 4"), output("multiply(1.5, 4) = 6"));
    assert_eq!(session.handle_line("divide 9 3"), output("divide(9, 3) = 3"));
    assert_eq!(session.handle_line("power 2 10"), output("power(2, 10) = 1024"));
    assert_eq!(session.handle_line("root 27 3"), output("root(27, 3) = 3"));

    assert_eq!(session.history().len(), 6);
}

#[test]
fn statistics_walkthrough() {
    let mut session = session();

    assert_eq!(session.handle_line("mean 1 2 3"), output("mean(1, 2, 3) = 2"));
    assert_eq!(session.handle_line("median 5 1 3 2"), output("median(5, 1, 3, 2) = 2.5"));
    assert_eq!(
        session.handle_line("variance 2 4 4 4 5 5 7 9"),
        output("variance(2, 4, 4, 4, 5, 5, 7, 9) = 4.57142857142857")
    );
    assert_eq!(session.handle_line("stdev 1 3"), output("stdev(1, 3) = 1.4142135623731"));
}

#[test]
fn decimal_inputs_give_decimal_results() {
    let mut session = session();

    assert_eq!(session.handle_line("add 0.1 0.2"), output("add(0.1, 0.2) = 0.3"));
    assert_eq!(session.handle_line("multiply 1.1 1.1"), output("multiply(1.1, 1.1) = 1.21"));
    assert_eq!(session.history().records()[0].result(), 0.3);
}

#[test]
fn mean_of_huge_values_stays_finite() {
    let mut session = session();

    assert_eq!(
        session.handle_line("mean 1e308 1e308"),
        output("mean(1e308, 1e308) = 1e308")
    );
    assert_eq!(
        session.handle_line("stdev 1e308 1e308"),
        output("stdev(1e308, 1e308) = 0")
    );
}

#[test]
fn stdev_of_single_value_is_rejected() {
    let mut session = session();

    let reply = session.handle_line("stdev 4");

    assert_eq!(
        reply,
        Reply::Error("invalid operands for stdev: expected at least 2 operand(s), got 1".to_string())
    );
    assert!(session.history().is_empty());
}

#[test]
fn unknown_operation_leaves_history_unchanged() {
    let mut session = session();
    session.handle_line("add 1 1");

    let reply = session.handle_line("foo 1 2");

    assert!(reply.is_error());
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.state(), ReplState::AwaitingInput);
}

#[test]
fn blank_input_is_silent() {
    let mut session = session();

    assert_eq!(session.handle_line(""), Reply::Silent);
    assert_eq!(session.handle_line("  \t"), Reply::Silent);
    assert!(session.history().is_empty());
}

#[test]
fn exit_terminates_session() {
    let mut session = session();

    let reply = session.handle_line("quit");

    assert!(matches!(reply, Reply::Goodbye(_)));
    assert_eq!(session.state(), ReplState::Terminated);
}

#[test]
fn export_round_trips_through_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("history.json");
    let bin_path = dir.path().join("out").join("history.bin");

    let mut session = session();
    session.handle_line("add 2 3");
    session.handle_line("mean 1 2 3");

    assert!(!session.handle_line(&format!("export {}", json_path.display())).is_error());
    assert!(!session.handle_line(&format!("export {}", bin_path.display())).is_error());

    let json = fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"operation\": \"mean\""));

    let from_json = HistorySnapshot::read_from(&json_path, SnapshotFormat::Json).unwrap();
    let from_bin = HistorySnapshot::read_from(&bin_path, SnapshotFormat::Binary).unwrap();
    assert_eq!(from_json.records, session.history().records());
    assert_eq!(from_bin.into_history(), *session.history());
}

#[test]
fn export_of_empty_history_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    let mut session = session();

    let reply = session.handle_line(&format!("export {}", path.display()));

    assert_eq!(
        reply,
        output(&format!("Exported 0 record(s) to {}", path.display()))
    );
    let snapshot = HistorySnapshot::read_from(&path, SnapshotFormat::Json).unwrap();
    assert!(snapshot.records.is_empty());
}

#[test]
fn scripted_session_produces_transcript() {
    let script = "add 2 3\nfoo 1 2\n\nhistory\nclear\nhistory\nexit\n";
    let mut session = session();
    let mut out = Vec::new();

    drive(&mut session, script.as_bytes(), &mut out).unwrap();

    let transcript = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines[0], "add(2, 3) = 5");
    assert!(lines[1].starts_with("Error: unknown command \"foo\""));
    assert_eq!(lines[2], "Calculation history:");
    assert!(lines[3].contains("add(2, 3) = 5"));
    assert_eq!(lines[4], "History cleared.");
    assert_eq!(lines[5], "History is empty.");
    assert_eq!(lines[6], "Goodbye!");
    assert!(session.is_terminated());
}
