//! Transition table entries.

use crate::action::{Action, ActionError, BoxedAction};
use crate::core::{Event, State};
use std::fmt;

/// An entry of a transition table: `(from, event) -> (to, action)`.
///
/// The action is owned exclusively by the transition.
pub struct Transition {
    pub from: State,
    pub event: Event,
    pub to: State,
    action: BoxedAction,
}

impl Transition {
    pub fn new(from: State, event: Event, to: State, action: impl Action + 'static) -> Self {
        Self::boxed(from, event, to, Box::new(action))
    }

    pub fn boxed(from: State, event: Event, to: State, action: BoxedAction) -> Self {
        Self {
            from,
            event,
            to,
            action,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn action_label(&self) -> &str {
        self.action.label()
    }

    pub(crate) fn run(&mut self) -> Result<(), ActionError> {
        self.action.execute()
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("action", &self.action.label())
            .finish()
    }
}
