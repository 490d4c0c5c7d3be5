//! Output sinks for action and harness messages.

use super::ActionError;
use parking_lot::Mutex;
use std::io::Write;

/// Line-oriented output sink shared by actions and the harness.
///
/// Implementations must be thread-safe so a single sink can be shared by
/// every action in a table.
pub trait Reporter: Send + Sync {
    /// Emit one line of output.
    fn emit(&self, line: &str) -> Result<(), ActionError>;
}

/// Reporter writing to any [`Write`] implementation, one line per call.
pub struct WriterReporter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn emit(&self, line: &str) -> Result<(), ActionError> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Reporter that keeps every line in memory.
#[derive(Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Reporter for MemoryReporter {
    fn emit(&self, line: &str) -> Result<(), ActionError> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
