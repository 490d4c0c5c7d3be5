//! Side-effecting behavior bound to transitions.
//!
//! An [`Action`] is run exactly once per matched transition, synchronously,
//! before the machine's state is advanced. If it fails the transition is
//! abandoned and the machine stays where it was.
//!
//! Two shapes ship with the crate:
//! - [`Notify`]: reports the event and the state it fired from
//! - [`CountedEffect`]: bumps a [`SharedCounter`] and reports the new value
//!
//! Anything else can be expressed with [`from_fn`].

mod counted;
mod notify;
mod reporter;

pub use counted::{CountedEffect, Direction, SharedCounter};
pub use notify::Notify;
pub use reporter::{MemoryReporter, Reporter, WriterReporter};

use thiserror::Error;

/// Errors raised by an action that could not complete.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("output failed: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),
}

/// A unit of side effect owned by a transition.
pub trait Action: Send {
    /// Run the effect.
    fn execute(&mut self) -> Result<(), ActionError>;

    /// Short name for diagnostics.
    fn label(&self) -> &str {
        "action"
    }
}

/// Owned, type-erased action as stored in a transition table.
pub type BoxedAction = Box<dyn Action>;

/// Action backed by a closure. Build one with [`from_fn`].
pub struct FnAction<F> {
    label: String,
    f: F,
}

/// Wrap a closure as an [`Action`].
///
/// # Example
///
/// ```rust
/// use tablefsm::action::{from_fn, Action};
///
/// let mut hits = 0;
/// {
///     let mut action = from_fn("count", || {
///         hits += 1;
///         Ok(())
///     });
///     action.execute().unwrap();
///     assert_eq!(action.label(), "count");
/// }
/// assert_eq!(hits, 1);
/// ```
pub fn from_fn<F>(label: impl Into<String>, f: F) -> FnAction<F>
where
    F: FnMut() -> Result<(), ActionError> + Send,
{
    FnAction {
        label: label.into(),
        f,
    }
}

impl<F> Action for FnAction<F>
where
    F: FnMut() -> Result<(), ActionError> + Send,
{
    fn execute(&mut self) -> Result<(), ActionError> {
        (self.f)()
    }

    fn label(&self) -> &str {
        &self.label
    }
}
