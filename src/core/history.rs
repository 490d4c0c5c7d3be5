//! Transition history tracking.
//!
//! Every successfully fired event is recorded as a [`TransitionRecord`].
//! The resulting [`StateHistory`] is the machine's state trajectory.

use super::identity::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{Event, State, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: State::new("ESTABLISHED"),
///     event: Event::new("RDATA"),
///     to: State::new("ESTABLISHED"),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert!(record.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state the event was fired in
    pub from: State,
    /// The event that matched
    pub event: Event,
    /// The state the machine moved to
    pub to: State,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
    /// 1-based position among the machine's successful fires
    pub sequence: u64,
}

impl TransitionRecord {
    /// True when the transition left the machine in the state it started in.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of fired transitions.
///
/// `record` is pure: it returns a new history and leaves `self` untouched.
///
/// # Example
///
/// ```rust
/// use tablefsm::core::{Event, State, StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(TransitionRecord {
///     from: State::new("CLOSED"),
///     event: Event::new("PASSIVE"),
///     to: State::new("LISTEN"),
///     timestamp: Utc::now(),
///     sequence: 1,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&State::new("CLOSED"), &State::new("LISTEN")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append in place. Used by the machine on its hot path.
    pub(crate) fn push(&mut self, transition: TransitionRecord) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first record followed by the `to`
    /// state of every record. Self-loops appear as repeated entries.
    pub fn get_path(&self) -> Vec<&State> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Events that matched, in firing order.
    pub fn events(&self) -> Vec<&Event> {
        self.transitions.iter().map(|t| &t.event).collect()
    }

    /// Elapsed time between the first and last record.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all records in order.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
