//! End-to-end lifecycle scenarios for the TCP reference machine.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tablefsm::action::MemoryReporter;
use tablefsm::machine::FsmError;
use tablefsm::tcp::{HarnessError, TcpMachine};

fn machine() -> (TcpMachine, Arc<MemoryReporter>) {
    let reporter = Arc::new(MemoryReporter::new());
    let machine = TcpMachine::new(reporter.clone()).unwrap();
    (machine, reporter)
}

/// Fire each token and collect the state reached after it.
fn drive(machine: &mut TcpMachine, tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| {
            machine.process_token(token).unwrap();
            machine.current_state_name().to_string()
        })
        .collect()
}

#[test]
fn passive_open_with_data_then_simultaneous_close() {
    let (mut machine, reporter) = machine();

    let states = drive(
        &mut machine,
        &["PASSIVE", "SYN", "ACK", "RDATA", "SDATA", "CLOSE", "FIN", "ACK", "TIMEOUT"],
    );

    assert_eq!(
        states,
        vec![
            "LISTEN",
            "SYN_RCVD",
            "ESTABLISHED",
            "ESTABLISHED",
            "ESTABLISHED",
            "FIN_WAIT_1",
            "CLOSING",
            "TIME_WAIT",
            "CLOSED",
        ]
    );
    assert_eq!(machine.data_count(), 2);

    let lines = reporter.lines();
    assert_eq!(lines[3], "DATA received 1");
    assert_eq!(lines[4], "DATA sent 2");
    assert_eq!(lines[8], "Event TIMEOUT received, current State is TIME_WAIT");
}

#[test]
fn invalid_event_in_closed_is_reported_without_moving() {
    let (mut machine, reporter) = machine();

    let err = machine.process_token("ACK").unwrap_err();

    match err {
        HarnessError::Machine(FsmError::UnexpectedEvent { state, event }) => {
            assert_eq!(state, "CLOSED");
            assert_eq!(event, "ACK");
        }
        other => panic!("Expected UnexpectedEvent, got {other:?}"),
    }
    assert_eq!(machine.current_state_name(), "CLOSED");
    assert!(reporter.lines().is_empty());
}

#[test]
fn active_open_then_orderly_close() {
    let (mut machine, _) = machine();

    let states = drive(
        &mut machine,
        &["ACTIVE", "SYNACK", "CLOSE", "ACK", "FIN", "TIMEOUT"],
    );

    assert_eq!(
        states,
        vec![
            "SYN_SENT",
            "ESTABLISHED",
            "FIN_WAIT_1",
            "FIN_WAIT_2",
            "TIME_WAIT",
            "CLOSED",
        ]
    );
    assert_eq!(machine.data_count(), 0);
}

#[test]
fn passive_close_through_last_ack() {
    let (mut machine, _) = machine();

    let states = drive(
        &mut machine,
        &["PASSIVE", "SYN", "ACK", "FIN", "CLOSE", "ACK"],
    );

    assert_eq!(
        states.last().map(String::as_str),
        Some("CLOSED"),
        "trajectory: {states:?}"
    );
    assert_eq!(states[3], "CLOSE_WAIT");
    assert_eq!(states[4], "LAST_ACK");
}

#[test]
fn closed_is_reachable_again_and_reusable() {
    let (mut machine, _) = machine();

    drive(&mut machine, &["PASSIVE", "CLOSE"]);
    assert_eq!(machine.current_state_name(), "CLOSED");

    drive(&mut machine, &["ACTIVE", "SYNACK", "RDATA"]);
    assert_eq!(machine.current_state_name(), "ESTABLISHED");
    assert_eq!(machine.fsm().events_fired(), 5);
}

#[test]
fn errors_between_valid_events_do_not_disturb_the_run() {
    let (mut machine, _) = machine();

    machine.process_token("PASSIVE").unwrap();
    assert!(machine.process_token("TIMEOUT").is_err());
    assert!(machine.process_token("NONSENSE").is_err());
    machine.process_token("SYN").unwrap();

    assert_eq!(machine.current_state_name(), "SYN_RCVD");
    let path: Vec<&str> = machine
        .fsm()
        .history()
        .get_path()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(path, vec!["CLOSED", "LISTEN", "SYN_RCVD"]);
}

#[test]
fn checkpoint_resumes_mid_connection() {
    let (mut machine, _) = machine();
    drive(&mut machine, &["ACTIVE", "SYNACK"]);
    let checkpoint = machine.fsm().checkpoint();

    let (mut resumed, reporter) = self::machine();
    resumed.fsm_mut().restore(&checkpoint).unwrap();
    resumed.process_token("CLOSE").unwrap();

    assert_eq!(resumed.current_state_name(), "FIN_WAIT_1");
    assert_eq!(
        reporter.lines(),
        vec!["Event CLOSE received, current State is ESTABLISHED"]
    );
}
