//! Token to event mapping owned by the harness.

use crate::core::Event;
use crate::tcp::error::HarnessError;
use std::collections::HashMap;

/// Maps raw input tokens onto the events registered with a machine.
///
/// Built once and passed to whatever reads input. Unknown tokens are
/// rejected here so they never reach [`Fsm::fire`](crate::machine::Fsm::fire).
#[derive(Clone, Debug, Default)]
pub struct EventCatalog {
    by_token: HashMap<String, Event>,
    order: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        let mut catalog = Self::default();
        for event in events {
            catalog.insert(event);
        }
        catalog
    }

    /// Register an event under its own name. Re-registering is a no-op.
    pub fn insert(&mut self, event: Event) {
        if !self.by_token.contains_key(event.name()) {
            self.by_token.insert(event.name().to_string(), event.clone());
            self.order.push(event);
        }
    }

    /// Look up the event for an exact token.
    pub fn resolve(&self, token: &str) -> Result<&Event, HarnessError> {
        self.by_token
            .get(token)
            .ok_or_else(|| HarnessError::UnknownEventToken {
                token: token.to_string(),
            })
    }

    /// Events in registration order.
    pub fn events(&self) -> &[Event] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
