//! Machine error types.

use crate::action::ActionError;
use thiserror::Error;

/// Errors from configuring or driving a machine.
#[derive(Debug, Error)]
pub enum FsmError {
    /// A second transition was registered for an existing `(state, event)` key.
    #[error("duplicate transition: state '{state}' already handles event '{event}'")]
    DuplicateTransition { state: String, event: String },

    /// A transition names a blank state or event.
    #[error("transition {field} name is blank")]
    BlankName { field: &'static str },

    /// A transition was registered after the machine started firing events.
    #[error("transition table is sealed after {events_fired} fired event(s)")]
    TableSealed { events_fired: u64 },

    /// No transition answers `event` in `state`. The state is unchanged.
    #[error("unexpected event '{event}' in state '{state}'")]
    UnexpectedEvent { state: String, event: String },

    /// The bound action failed. The state is unchanged.
    #[error("action for event '{event}' in state '{state}' failed: {source}")]
    ActionFailed {
        state: String,
        event: String,
        #[source]
        source: ActionError,
    },
}

impl FsmError {
    /// Returns whether the caller can keep feeding events after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FsmError::UnexpectedEvent { .. })
    }

    /// Returns a stable code for reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            FsmError::DuplicateTransition { .. } => "DUPLICATE_TRANSITION",
            FsmError::BlankName { .. } => "BLANK_NAME",
            FsmError::TableSealed { .. } => "TABLE_SEALED",
            FsmError::UnexpectedEvent { .. } => "UNEXPECTED_EVENT",
            FsmError::ActionFailed { .. } => "ACTION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unexpected_event_is_recoverable() {
        let unexpected = FsmError::UnexpectedEvent {
            state: "CLOSED".into(),
            event: "ACK".into(),
        };
        let duplicate = FsmError::DuplicateTransition {
            state: "CLOSED".into(),
            event: "ACK".into(),
        };
        let failed = FsmError::ActionFailed {
            state: "CLOSED".into(),
            event: "ACK".into(),
            source: ActionError::Failed("boom".into()),
        };

        assert!(unexpected.is_recoverable());
        assert!(!duplicate.is_recoverable());
        assert!(!failed.is_recoverable());
        assert!(!FsmError::TableSealed { events_fired: 1 }.is_recoverable());
        assert!(!FsmError::BlankName { field: "to" }.is_recoverable());
    }

    #[test]
    fn messages_carry_state_and_event() {
        let err = FsmError::UnexpectedEvent {
            state: "CLOSED".into(),
            event: "ACK".into(),
        };
        assert_eq!(err.to_string(), "unexpected event 'ACK' in state 'CLOSED'");
        assert_eq!(err.error_code(), "UNEXPECTED_EVENT");
    }
}
