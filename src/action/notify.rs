use super::{Action, ActionError, Reporter};
use crate::core::{Event, State};
use std::sync::Arc;

/// Reports which event arrived and the state it arrived in.
///
/// Emits `Event <EVENT> received, current State is <STATE>`.
pub struct Notify {
    event: Event,
    state: State,
    reporter: Arc<dyn Reporter>,
}

impl Notify {
    pub fn new(event: Event, state: State, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            event,
            state,
            reporter,
        }
    }

    /// The line this action emits.
    pub fn message(&self) -> String {
        format!(
            "Event {} received, current State is {}",
            self.event, self.state
        )
    }
}

impl Action for Notify {
    fn execute(&mut self) -> Result<(), ActionError> {
        self.reporter.emit(&self.message())
    }

    fn label(&self) -> &str {
        "notify"
    }
}
