//! Line-oriented simulator loop.

use super::{HarnessError, SessionError, TcpMachine, EVENTS};
use crate::action::Reporter;
use std::io::BufRead;
use std::sync::Arc;

const RULE: &str = "============================================================";

/// Knobs for a simulator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    /// Uppercase tokens before lookup.
    pub uppercase: bool,
    /// Print the banner and the initial state.
    pub banner: bool,
    /// Stop at the first rejected token instead of continuing.
    pub stop_on_error: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            banner: true,
            stop_on_error: false,
        }
    }
}

/// Totals reported when a session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub tokens: usize,
    pub applied: u64,
    pub rejected: usize,
    pub final_state: String,
    pub data_events: u64,
}

/// Feeds tokens from a reader into a [`TcpMachine`] and reports each step.
///
/// Action output and session output share one [`Reporter`], so the
/// transcript interleaves in firing order.
pub struct Session {
    machine: TcpMachine,
    reporter: Arc<dyn Reporter>,
    options: SessionOptions,
}

impl Session {
    pub fn new(reporter: Arc<dyn Reporter>, options: SessionOptions) -> Result<Self, SessionError> {
        let machine = TcpMachine::new(Arc::clone(&reporter))?;
        Ok(Self {
            machine,
            reporter,
            options,
        })
    }

    pub fn machine(&self) -> &TcpMachine {
        &self.machine
    }

    /// Consume every whitespace-separated token in `input`.
    ///
    /// Unknown tokens and unexpected events are reported and skipped.
    /// Failed actions and I/O errors end the session with an error.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary, SessionError> {
        if self.options.banner {
            self.banner()?;
        }

        let mut tokens = 0;
        let mut rejected = 0;
        'input: for line in input.lines() {
            let line = line?;
            for raw in line.split_whitespace() {
                let token = if self.options.uppercase {
                    raw.trim().to_uppercase()
                } else {
                    raw.trim().to_string()
                };
                tokens += 1;

                match self.machine.process_token(&token) {
                    Ok(step) => {
                        tracing::debug!(token = %token, to = %step.to, "token applied");
                    }
                    Err(HarnessError::Machine(err)) if !err.is_recoverable() => {
                        return Err(err.into());
                    }
                    Err(err) => {
                        rejected += 1;
                        self.reject(&err)?;
                        if self.options.stop_on_error {
                            self.emit_state()?;
                            break 'input;
                        }
                    }
                }
                self.emit_state()?;
            }
        }

        let summary = SessionSummary {
            tokens,
            applied: self.machine.fsm().events_fired(),
            rejected,
            final_state: self.machine.current_state_name().to_string(),
            data_events: self.machine.data_count(),
        };
        self.footer(&summary)?;
        tracing::info!(
            tokens = summary.tokens,
            applied = summary.applied,
            rejected = summary.rejected,
            final_state = %summary.final_state,
            "session finished"
        );
        Ok(summary)
    }

    fn banner(&self) -> Result<(), SessionError> {
        let (first, rest) = EVENTS.split_at(5);
        self.reporter.emit(RULE)?;
        self.reporter.emit("TCP State Machine Simulator")?;
        self.reporter.emit("Table-driven FSM engine")?;
        self.reporter.emit(RULE)?;
        self.reporter
            .emit(&format!("Valid events: {},", first.join(", ")))?;
        self.reporter
            .emit(&format!("              {}", rest.join(", ")))?;
        if self.options.uppercase {
            self.reporter.emit("Events are case-insensitive")?;
        } else {
            self.reporter.emit("Events must be in UPPERCASE")?;
        }
        self.reporter.emit(RULE)?;
        self.reporter.emit(&format!(
            "Initial state: {}",
            self.machine.current_state_name()
        ))?;
        self.reporter.emit("")?;
        Ok(())
    }

    fn reject(&self, err: &HarnessError) -> Result<(), SessionError> {
        tracing::debug!(error = %err, "token rejected");
        self.reporter.emit(&format!("Error: {err}"))?;
        Ok(())
    }

    fn emit_state(&self) -> Result<(), SessionError> {
        self.reporter.emit(&format!(
            "Current state: {}",
            self.machine.current_state_name()
        ))?;
        self.reporter.emit("")?;
        Ok(())
    }

    fn footer(&self, summary: &SessionSummary) -> Result<(), SessionError> {
        self.reporter.emit(RULE)?;
        self.reporter.emit(&format!(
            "Program terminated. Final state: {}",
            summary.final_state
        ))?;
        self.reporter
            .emit(&format!("Data events processed: {}", summary.data_events))?;
        self.reporter.emit(RULE)?;
        Ok(())
    }
}
