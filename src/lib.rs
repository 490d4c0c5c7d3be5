//! Tablefsm: a table-driven finite state machine engine
//!
//! States, events and transitions are data. A machine is configured once
//! with a table mapping `(state, event)` to `(next state, action)`, then
//! every incoming event is resolved by lookup rather than hand-written
//! branching.
//!
//! # Core Concepts
//!
//! - **State / Event**: named identity tokens, equal by name
//! - **Action**: the side effect bound to a transition, run before the state advances
//! - **Fsm**: owns the current state and the table; `fire` applies one event
//! - **FsmError**: unexpected events come back as values and never move the machine
//!
//! The [`tcp`] module is a reference consumer modeling a simplified TCP
//! connection lifecycle.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tablefsm::action::{MemoryReporter, Notify};
//! use tablefsm::builder::FsmBuilder;
//! use tablefsm::core::{Event, State};
//! use tablefsm::machine::FsmError;
//!
//! let reporter = Arc::new(MemoryReporter::new());
//! let (off, on) = (State::new("OFF"), State::new("ON"));
//! let toggle = Event::new("TOGGLE");
//!
//! let mut fsm = FsmBuilder::new("switch")
//!     .initial(off.clone())
//!     .transition(
//!         off.clone(),
//!         toggle.clone(),
//!         on.clone(),
//!         Notify::new(toggle.clone(), off.clone(), reporter.clone()),
//!     )
//!     .build()
//!     .unwrap();
//!
//! fsm.fire(&toggle).unwrap();
//! assert_eq!(fsm.current_state_name(), "ON");
//! assert_eq!(reporter.lines(), vec!["Event TOGGLE received, current State is OFF"]);
//!
//! let err = fsm.fire(&toggle).unwrap_err();
//! assert!(matches!(err, FsmError::UnexpectedEvent { .. }));
//! assert_eq!(fsm.current_state_name(), "ON");
//! ```

pub mod action;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod tcp;

// Re-export commonly used types
pub use crate::action::{Action, ActionError};
pub use crate::builder::{BuildError, FsmBuilder};
pub use crate::core::{Event, State, StateHistory, TransitionRecord};
pub use crate::machine::{Fsm, FsmError, Step, Transition};
