//! Harness error types.

use crate::action::ActionError;
use crate::builder::BuildError;
use crate::machine::FsmError;
use thiserror::Error;

/// Errors from feeding raw tokens to the TCP machine.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The token names no configured event. The machine was not touched.
    #[error("unexpected Event: {token}")]
    UnknownEventToken { token: String },

    #[error(transparent)]
    Machine(#[from] FsmError),
}

impl HarnessError {
    /// Returns whether the caller can keep feeding tokens after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            HarnessError::UnknownEventToken { .. } => true,
            HarnessError::Machine(e) => e.is_recoverable(),
        }
    }
}

/// Errors that end a simulator session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to configure machine: {0}")]
    Build(#[from] BuildError),

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] ActionError),

    #[error("machine failure: {0}")]
    Machine(#[from] FsmError),
}
