//! Core identity and history types.
//!
//! This module contains the behavior-free vocabulary of a machine:
//! - `State` and `Event` identity tokens
//! - Transition history for trajectory inspection

mod history;
mod identity;

pub use history::{StateHistory, TransitionRecord};
pub use identity::{Event, State};
