//! The transition table and its dispatcher.
//!
//! # Key Concepts
//!
//! - **Transition**: `(from, event) -> (to, action)`, one entry per key
//! - **Fsm**: owns the current state and the table; `fire` resolves and applies
//! - **FsmError**: duplicate keys, sealed tables, unexpected events, failed actions
//!
//! Unexpected events are an ordinary outcome of `fire`, returned as a value.
//! They never change the current state.

mod error;
mod fsm;
mod transition;

pub use error::FsmError;
pub use fsm::{Fsm, Step};
pub use transition::Transition;
