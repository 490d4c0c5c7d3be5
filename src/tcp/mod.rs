//! Simplified TCP connection lifecycle on top of the generic engine.
//!
//! This is a consumer of the engine, not part of it: it names the states
//! and events, wires one action per transition and owns the data counter
//! shared by the `RDATA`/`SDATA` self-loops in `ESTABLISHED`.

mod catalog;
mod error;
mod session;

pub use catalog::EventCatalog;
pub use error::{HarnessError, SessionError};
pub use session::{Session, SessionOptions, SessionSummary};

use crate::action::{CountedEffect, Direction, Notify, Reporter, SharedCounter};
use crate::builder::{BuildError, FsmBuilder};
use crate::core::{Event, State};
use crate::machine::{Fsm, Step};
use std::sync::Arc;

/// Name given to the underlying [`Fsm`].
pub const MACHINE_NAME: &str = "TCP_FSM";

/// Every TCP state, `CLOSED` first.
pub const STATES: [&str; 11] = [
    "CLOSED",
    "LISTEN",
    "SYN_SENT",
    "SYN_RCVD",
    "ESTABLISHED",
    "FIN_WAIT_1",
    "FIN_WAIT_2",
    "CLOSING",
    "TIME_WAIT",
    "CLOSE_WAIT",
    "LAST_ACK",
];

/// Every TCP event, in banner order.
pub const EVENTS: [&str; 10] = [
    "PASSIVE", "ACTIVE", "SYN", "SYNACK", "ACK", "RDATA", "SDATA", "FIN", "CLOSE", "TIMEOUT",
];

enum Effect {
    Notify,
    Data(Direction),
}

/// `(from, event, to, effect)` for every registered transition.
const TABLE: [(&str, &str, &str, Effect); 20] = [
    ("CLOSED", "PASSIVE", "LISTEN", Effect::Notify),
    ("CLOSED", "ACTIVE", "SYN_SENT", Effect::Notify),
    ("LISTEN", "SYN", "SYN_RCVD", Effect::Notify),
    ("LISTEN", "CLOSE", "CLOSED", Effect::Notify),
    ("SYN_SENT", "SYN", "SYN_RCVD", Effect::Notify),
    ("SYN_SENT", "SYNACK", "ESTABLISHED", Effect::Notify),
    ("SYN_SENT", "CLOSE", "CLOSED", Effect::Notify),
    ("SYN_RCVD", "ACK", "ESTABLISHED", Effect::Notify),
    ("SYN_RCVD", "CLOSE", "FIN_WAIT_1", Effect::Notify),
    ("ESTABLISHED", "RDATA", "ESTABLISHED", Effect::Data(Direction::Received)),
    ("ESTABLISHED", "SDATA", "ESTABLISHED", Effect::Data(Direction::Sent)),
    ("ESTABLISHED", "FIN", "CLOSE_WAIT", Effect::Notify),
    ("ESTABLISHED", "CLOSE", "FIN_WAIT_1", Effect::Notify),
    ("FIN_WAIT_1", "FIN", "CLOSING", Effect::Notify),
    ("FIN_WAIT_1", "ACK", "FIN_WAIT_2", Effect::Notify),
    ("FIN_WAIT_2", "FIN", "TIME_WAIT", Effect::Notify),
    ("CLOSING", "ACK", "TIME_WAIT", Effect::Notify),
    ("TIME_WAIT", "TIMEOUT", "CLOSED", Effect::Notify),
    ("CLOSE_WAIT", "CLOSE", "LAST_ACK", Effect::Notify),
    ("LAST_ACK", "ACK", "CLOSED", Effect::Notify),
];

/// The TCP lifecycle machine with its token catalog and data counter.
pub struct TcpMachine {
    fsm: Fsm,
    catalog: EventCatalog,
    data_count: SharedCounter,
}

impl TcpMachine {
    /// Configure the machine in `CLOSED`, sending action output to `reporter`.
    pub fn new(reporter: Arc<dyn Reporter>) -> Result<Self, BuildError> {
        let data_count = SharedCounter::new();
        let mut builder = FsmBuilder::new(MACHINE_NAME).initial(State::new(STATES[0]));

        for (from, event, to, effect) in TABLE {
            let (from, event, to) = (State::new(from), Event::new(event), State::new(to));
            builder = match effect {
                Effect::Notify => {
                    let action = Notify::new(event.clone(), from.clone(), Arc::clone(&reporter));
                    builder.transition(from, event, to, action)
                }
                Effect::Data(direction) => {
                    let action = CountedEffect::new(
                        "DATA",
                        direction,
                        data_count.clone(),
                        Arc::clone(&reporter),
                    );
                    builder.transition(from, event, to, action)
                }
            };
        }

        Ok(Self {
            fsm: builder.build()?,
            catalog: EventCatalog::new(EVENTS.into_iter().map(Event::new)),
            data_count,
        })
    }

    /// Resolve a raw token and fire it.
    ///
    /// Unknown tokens are rejected before reaching the machine.
    pub fn process_token(&mut self, token: &str) -> Result<Step, HarnessError> {
        let event = self.catalog.resolve(token)?;
        Ok(self.fsm.fire(event)?)
    }

    pub fn current_state_name(&self) -> &str {
        self.fsm.current_state_name()
    }

    /// Total `RDATA` + `SDATA` events processed.
    pub fn data_count(&self) -> u64 {
        self.data_count.get()
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut Fsm {
        &mut self.fsm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MemoryReporter;

    fn machine() -> (TcpMachine, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let machine = TcpMachine::new(reporter.clone()).unwrap();
        (machine, reporter)
    }

    #[test]
    fn table_covers_every_state_and_event() {
        let (machine, _) = machine();

        assert_eq!(machine.fsm().transition_count(), 20);
        assert_eq!(machine.fsm().states().len(), STATES.len());
        assert_eq!(machine.catalog().len(), EVENTS.len());
        assert_eq!(machine.current_state_name(), "CLOSED");
    }

    #[test]
    fn notify_reports_source_state() {
        let (mut machine, reporter) = machine();

        machine.process_token("ACTIVE").unwrap();

        assert_eq!(
            reporter.lines(),
            vec!["Event ACTIVE received, current State is CLOSED"]
        );
        assert_eq!(machine.current_state_name(), "SYN_SENT");
    }

    #[test]
    fn data_self_loops_share_counter() {
        let (mut machine, reporter) = machine();
        for token in ["ACTIVE", "SYNACK", "RDATA", "RDATA", "SDATA"] {
            machine.process_token(token).unwrap();
        }

        assert_eq!(machine.current_state_name(), "ESTABLISHED");
        assert_eq!(machine.data_count(), 3);
        assert_eq!(
            reporter.lines()[2..].to_vec(),
            vec!["DATA received 1", "DATA received 2", "DATA sent 3"]
        );
    }

    #[test]
    fn unknown_token_never_reaches_machine() {
        let (mut machine, reporter) = machine();

        let err = machine.process_token("HELLO").unwrap_err();

        assert!(matches!(err, HarnessError::UnknownEventToken { .. }));
        assert_eq!(machine.current_state_name(), "CLOSED");
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn data_outside_established_is_unexpected() {
        let (mut machine, _) = machine();

        let err = machine.process_token("RDATA").unwrap_err();

        assert!(matches!(
            err,
            HarnessError::Machine(crate::machine::FsmError::UnexpectedEvent { .. })
        ));
        assert_eq!(machine.data_count(), 0);
    }
}
