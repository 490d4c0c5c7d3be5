//! Build errors for machine configuration.

use crate::machine::FsmError;
use thiserror::Error;

/// A single defect found while validating a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("initial state has a blank name")]
    BlankInitialState,

    #[error("transition #{position} has a blank state name")]
    BlankStateName { position: usize },

    #[error("transition #{position} has a blank event name")]
    BlankEventName { position: usize },

    #[error("transition #{position} duplicates ('{state}', '{event}')")]
    DuplicateTransition {
        position: usize,
        state: String,
        event: String,
    },
}

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("invalid transition table: {}", describe(.violations))]
    Invalid { violations: Vec<ConfigViolation> },

    #[error(transparent)]
    Machine(#[from] FsmError),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let err = BuildError::Invalid {
            violations: vec![
                ConfigViolation::BlankEventName { position: 0 },
                ConfigViolation::DuplicateTransition {
                    position: 3,
                    state: "CLOSED".into(),
                    event: "ACK".into(),
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid transition table: transition #0 has a blank event name; \
             transition #3 duplicates ('CLOSED', 'ACK')"
        );
    }
}
