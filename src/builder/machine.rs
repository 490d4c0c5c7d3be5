//! Builder for constructing machines.

use crate::action::Action;
use crate::builder::error::BuildError;
use crate::builder::validation::validate_table;
use crate::core::{Event, State};
use crate::machine::{Fsm, Transition};
use stillwater::validation::Validation;

/// Fluent configuration front-end for [`Fsm`].
///
/// Unlike [`Fsm::add_transition`], which rejects the first duplicate it
/// meets, `build` validates the whole table and reports every violation.
///
/// # Example
///
/// ```rust
/// use tablefsm::action::from_fn;
/// use tablefsm::builder::FsmBuilder;
/// use tablefsm::core::{Event, State};
///
/// let fsm = FsmBuilder::new("door")
///     .initial(State::new("CLOSED"))
///     .transition(State::new("CLOSED"), Event::new("OPEN"), State::new("OPEN"), from_fn("creak", || Ok(())))
///     .transition(State::new("OPEN"), Event::new("CLOSE"), State::new("CLOSED"), from_fn("slam", || Ok(())))
///     .build()
///     .unwrap();
///
/// assert_eq!(fsm.current_state_name(), "CLOSED");
/// assert_eq!(fsm.transition_count(), 2);
/// ```
pub struct FsmBuilder {
    name: String,
    initial: Option<State>,
    transitions: Vec<Transition>,
}

impl FsmBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Register `(from, event) -> (to, action)`.
    pub fn transition(
        mut self,
        from: State,
        event: Event,
        to: State,
        action: impl Action + 'static,
    ) -> Self {
        self.transitions
            .push(Transition::new(from, event, to, action));
        self
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Validate and build the machine.
    pub fn build(self) -> Result<Fsm, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        if let Validation::Failure(errors) = validate_table(&initial, &self.transitions) {
            let violations: Vec<_> = errors.iter().cloned().collect();
            tracing::error!(
                machine = %self.name,
                violations = violations.len(),
                "transition table rejected"
            );
            return Err(BuildError::Invalid { violations });
        }

        let mut machine = Fsm::new(self.name, initial);
        for transition in self.transitions {
            machine.add_transition(transition)?;
        }

        tracing::info!(
            machine = machine.name(),
            initial = %machine.initial_state(),
            transitions = machine.transition_count(),
            "machine configured"
        );
        Ok(machine)
    }
}
