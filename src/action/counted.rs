//! Counted data actions.

use super::{Action, ActionError, Reporter};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter shared between actions.
///
/// Clones point at the same value, so a "received" and a "sent" action
/// built from clones of one counter increment a single total.
#[derive(Clone, Debug, Default)]
pub struct SharedCounter(Arc<AtomicU64>);

impl SharedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn decrement(&self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Semantic direction of a counted data event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Received,
    Sent,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => f.write_str("received"),
            Self::Sent => f.write_str("sent"),
        }
    }
}

/// Increments a shared counter and reports the new total.
///
/// Emits `<LABEL> <direction> <n>`, e.g. `DATA received 1`. If the line
/// cannot be emitted the increment is undone.
pub struct CountedEffect {
    label: String,
    direction: Direction,
    counter: SharedCounter,
    reporter: Arc<dyn Reporter>,
}

impl CountedEffect {
    pub fn new(
        label: impl Into<String>,
        direction: Direction,
        counter: SharedCounter,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            label: label.into(),
            direction,
            counter,
            reporter,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Action for CountedEffect {
    fn execute(&mut self) -> Result<(), ActionError> {
        let count = self.counter.increment();
        let line = format!("{} {} {}", self.label, self.direction, count);
        if let Err(err) = self.reporter.emit(&line) {
            self.counter.decrement();
            return Err(err);
        }
        Ok(())
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MemoryReporter;
    use crate::core::{Event, State};
    use crate::machine::{Fsm, FsmError, Transition};

    #[test]
    fn counter_clones_share_value() {
        let counter = SharedCounter::new();
        let other = counter.clone();

        assert_eq!(counter.increment(), 1);
        assert_eq!(other.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn received_and_sent_share_one_total() {
        let reporter = Arc::new(MemoryReporter::new());
        let counter = SharedCounter::new();
        let mut received = CountedEffect::new(
            "DATA",
            Direction::Received,
            counter.clone(),
            reporter.clone(),
        );
        let mut sent = CountedEffect::new("DATA", Direction::Sent, counter.clone(), reporter.clone());

        received.execute().unwrap();
        sent.execute().unwrap();
        received.execute().unwrap();

        assert_eq!(counter.get(), 3);
        assert_eq!(
            reporter.lines(),
            vec!["DATA received 1", "DATA sent 2", "DATA received 3"]
        );
    }

    struct ClosedReporter;

    impl Reporter for ClosedReporter {
        fn emit(&self, _line: &str) -> Result<(), ActionError> {
            Err(ActionError::Failed("output closed".into()))
        }
    }

    #[test]
    fn failed_emit_leaves_counter_unchanged() {
        let counter = SharedCounter::new();
        let mut action = CountedEffect::new(
            "DATA",
            Direction::Received,
            counter.clone(),
            Arc::new(ClosedReporter),
        );

        assert!(action.execute().is_err());
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn aborted_data_transition_is_not_counted() {
        let counter = SharedCounter::new();
        let established = State::new("ESTABLISHED");
        let mut fsm = Fsm::new("tcp", established.clone());
        fsm.add_transition(Transition::new(
            established.clone(),
            Event::new("RDATA"),
            established,
            CountedEffect::new(
                "DATA",
                Direction::Received,
                counter.clone(),
                Arc::new(ClosedReporter),
            ),
        ))
        .unwrap();

        let err = fsm.fire(&Event::new("RDATA")).unwrap_err();

        assert!(matches!(err, FsmError::ActionFailed { .. }));
        assert_eq!(counter.get(), 0);
        assert_eq!(fsm.events_fired(), 0);
    }

    #[test]
    fn counter_is_safe_across_threads() {
        let counter = SharedCounter::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        counter.increment();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.get(), 1000);
    }

    #[test]
    fn direction_displays_lowercase() {
        assert_eq!(Direction::Received.to_string(), "received");
        assert_eq!(Direction::Sent.to_string(), "sent");
    }
}
