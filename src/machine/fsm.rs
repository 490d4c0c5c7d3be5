//! Table-driven dispatch.

use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{Event, State, StateHistory, TransitionRecord};
use crate::machine::error::FsmError;
use crate::machine::transition::Transition;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};

/// Outcome of a successful [`Fsm::fire`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub from: State,
    pub event: Event,
    pub to: State,
    /// 1-based count of successful fires, this one included
    pub sequence: u64,
}

impl Step {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Finite state machine driven by a transition table.
///
/// The table maps `(state, event)` to exactly one [`Transition`]. It is
/// populated with [`add_transition`](Fsm::add_transition) and becomes
/// read-only once the first event is fired or a checkpoint is restored.
///
/// A machine is driven by one thread of control at a time: [`fire`](Fsm::fire)
/// takes `&mut self`. Share it across threads behind a mutex that also
/// covers any counters its actions touch.
///
/// # Example
///
/// ```rust
/// use tablefsm::action::from_fn;
/// use tablefsm::core::{Event, State};
/// use tablefsm::machine::{Fsm, FsmError, Transition};
///
/// let closed = State::new("CLOSED");
/// let listen = State::new("LISTEN");
/// let passive = Event::new("PASSIVE");
///
/// let mut fsm = Fsm::new("demo", closed.clone());
/// fsm.add_transition(Transition::new(
///     closed.clone(),
///     passive.clone(),
///     listen.clone(),
///     from_fn("open", || Ok(())),
/// ))
/// .unwrap();
///
/// let step = fsm.fire(&passive).unwrap();
/// assert_eq!(step.to, listen);
/// assert_eq!(fsm.current_state_name(), "LISTEN");
///
/// // LISTEN has no PASSIVE transition: reported, state untouched.
/// let err = fsm.fire(&passive).unwrap_err();
/// assert!(matches!(err, FsmError::UnexpectedEvent { .. }));
/// assert_eq!(fsm.current_state_name(), "LISTEN");
/// ```
pub struct Fsm {
    name: String,
    initial: State,
    current: State,
    table: HashMap<State, HashMap<Event, Transition>>,
    transition_count: usize,
    history: StateHistory,
    events_fired: u64,
    sealed: bool,
}

impl Fsm {
    /// Create a machine in `initial` with an empty table.
    ///
    /// `initial` must have a non-blank name. [`FsmBuilder`](crate::builder::FsmBuilder)
    /// checks this; a blank initial state here matches no transition.
    pub fn new(name: impl Into<String>, initial: State) -> Self {
        Self {
            name: name.into(),
            current: initial.clone(),
            initial,
            table: HashMap::new(),
            transition_count: 0,
            history: StateHistory::new(),
            events_fired: 0,
            sealed: false,
        }
    }

    /// Register a transition.
    ///
    /// Fails if any name is blank, if `(from, event)` is already handled,
    /// or if the machine has already fired an event or been restored.
    pub fn add_transition(&mut self, transition: Transition) -> Result<(), FsmError> {
        if self.sealed {
            return Err(FsmError::TableSealed {
                events_fired: self.events_fired,
            });
        }
        let blank = [
            ("from", transition.from.is_blank()),
            ("event", transition.event.is_blank()),
            ("to", transition.to.is_blank()),
        ]
        .into_iter()
        .find_map(|(field, blank)| blank.then_some(field));
        if let Some(field) = blank {
            return Err(FsmError::BlankName { field });
        }

        let row = self.table.entry(transition.from.clone()).or_default();
        if row.contains_key(&transition.event) {
            return Err(FsmError::DuplicateTransition {
                state: transition.from.name().to_string(),
                event: transition.event.name().to_string(),
            });
        }

        tracing::trace!(
            machine = %self.name,
            from = %transition.from,
            event = %transition.event,
            to = %transition.to,
            "registered transition"
        );
        row.insert(transition.event.clone(), transition);
        self.transition_count += 1;
        Ok(())
    }

    /// Deliver one event.
    ///
    /// On a hit the bound action runs first; only if it succeeds does the
    /// machine move to the target state. On a miss, or if the action
    /// fails, the current state is left untouched.
    pub fn fire(&mut self, event: &Event) -> Result<Step, FsmError> {
        let Some(transition) = self
            .table
            .get_mut(&self.current)
            .and_then(|row| row.get_mut(event))
        else {
            tracing::debug!(
                machine = %self.name,
                state = %self.current,
                event = %event,
                "no transition"
            );
            return Err(FsmError::UnexpectedEvent {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
            });
        };

        if let Err(source) = transition.run() {
            tracing::warn!(
                machine = %self.name,
                state = %self.current,
                event = %event,
                action = transition.action_label(),
                error = %source,
                "action failed, transition abandoned"
            );
            return Err(FsmError::ActionFailed {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
                source,
            });
        }

        let to = transition.to.clone();
        let from = std::mem::replace(&mut self.current, to.clone());
        self.events_fired += 1;
        self.sealed = true;

        tracing::debug!(
            machine = %self.name,
            from = %from,
            event = %event,
            to = %to,
            sequence = self.events_fired,
            "transition applied"
        );

        self.history.push(TransitionRecord {
            from: from.clone(),
            event: event.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
            sequence: self.events_fired,
        });

        Ok(Step {
            from,
            event: event.clone(),
            to,
            sequence: self.events_fired,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> &State {
        &self.current
    }

    pub fn current_state_name(&self) -> &str {
        self.current.name()
    }

    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    /// Get the trajectory of fired transitions (pure)
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Number of successful fires.
    pub fn events_fired(&self) -> u64 {
        self.events_fired
    }

    /// Whether the table has stopped accepting transitions.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// Check whether `(state, event)` has an entry (pure)
    pub fn handles(&self, state: &State, event: &Event) -> bool {
        self.table
            .get(state)
            .is_some_and(|row| row.contains_key(event))
    }

    /// Events with a transition out of the current state, sorted by name.
    pub fn expected_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .table
            .get(&self.current)
            .map(|row| row.keys().collect())
            .unwrap_or_default();
        events.sort();
        events
    }

    /// Every state named by the table, plus the initial state.
    pub fn states(&self) -> BTreeSet<&State> {
        let mut states = BTreeSet::new();
        states.insert(&self.initial);
        for row in self.table.values() {
            for transition in row.values() {
                states.insert(&transition.from);
                states.insert(&transition.to);
            }
        }
        states
    }

    /// Snapshot the runtime position of this machine.
    ///
    /// The transition table is not part of the checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            &self.name,
            self.initial.clone(),
            self.current.clone(),
            self.history.clone(),
            self.events_fired,
        )
    }

    /// Resume from a checkpoint taken on an identically configured machine.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.machine != self.name {
            return Err(CheckpointError::ValidationFailed(format!(
                "checkpoint belongs to machine '{}', not '{}'",
                checkpoint.machine, self.name
            )));
        }
        if checkpoint.initial_state != self.initial {
            return Err(CheckpointError::ValidationFailed(format!(
                "initial state '{}' does not match '{}'",
                checkpoint.initial_state, self.initial
            )));
        }
        if !self.states().contains(&checkpoint.current_state) {
            return Err(CheckpointError::ValidationFailed(format!(
                "state '{}' is unknown to the transition table",
                checkpoint.current_state
            )));
        }
        Self::check_trajectory(checkpoint)?;

        self.current = checkpoint.current_state.clone();
        self.history = checkpoint.history.clone();
        self.events_fired = checkpoint.events_fired;
        self.sealed = true;
        tracing::info!(
            machine = %self.name,
            state = %self.current,
            checkpoint = %checkpoint.id,
            "restored from checkpoint"
        );
        Ok(())
    }

    /// The recorded history must end where the checkpoint says the machine is.
    fn check_trajectory(checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        let recorded = checkpoint.history.len() as u64;
        if recorded != checkpoint.events_fired {
            return Err(CheckpointError::ValidationFailed(format!(
                "history holds {} transition(s) but {} event(s) were fired",
                recorded, checkpoint.events_fired
            )));
        }

        let reached = checkpoint
            .history
            .transitions()
            .last()
            .map_or(&checkpoint.initial_state, |record| &record.to);
        if *reached != checkpoint.current_state {
            return Err(CheckpointError::ValidationFailed(format!(
                "history ends in '{}' but current state is '{}'",
                reached, checkpoint.current_state
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Fsm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .field("current", &self.current)
            .field("transitions", &self.transition_count)
            .field("events_fired", &self.events_fired)
            .field("sealed", &self.sealed)
            .finish()
    }
}
