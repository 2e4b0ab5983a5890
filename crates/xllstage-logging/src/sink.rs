//! Diagnostic sinks

use crate::LogLevel;
use parking_lot::Mutex;

/// Receiver for diagnostic messages.
///
/// Sinks are informational only; they cannot fail or influence a run.
pub trait DiagnosticSink: Send + Sync {
    fn log(&self, level: LogLevel, target: &str, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(LogLevel, &str, &str) + Send + Sync,
{
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        self(level, target, message)
    }
}

/// One captured diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages at or above `level`, in arrival order.
    pub fn messages_at_least(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level >= level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Remove and return all records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl DiagnosticSink for CollectingSink {
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            target: target.to_string(),
            message: message.to_string(),
        });
    }
}
