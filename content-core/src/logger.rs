//! Leveled, flag-gated logging channel
//!
//! A [`Logger`] applies the module's logging flags and hands surviving records
//! to a [`LogSink`]. The default sink forwards to `tracing`; [`MemorySink`]
//! keeps records in memory so tooling and tests can inspect them.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// A single log record as seen by a sink
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Name of the logger that produced the record
    pub logger: &'a str,
    pub level: LogLevel,
    pub message: &'a str,
    pub cause: Option<&'a (dyn Error + 'static)>,
}

/// Destination for log records that passed the logger's gating
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord<'_>);
}

/// Sink forwarding records to `tracing` events
///
/// The logger name is attached as the `logger` field and the cause, if any,
/// as the `cause` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord<'_>) {
        let cause = record.cause.map(|cause| cause.to_string());
        let cause = cause.as_deref();
        match record.level {
            LogLevel::Error => tracing::error!(logger = record.logger, cause, "{}", record.message),
            LogLevel::Warn => tracing::warn!(logger = record.logger, cause, "{}", record.message),
            LogLevel::Info => tracing::info!(logger = record.logger, cause, "{}", record.message),
            LogLevel::Debug => tracing::debug!(logger = record.logger, cause, "{}", record.message),
        }
    }
}

/// Owned copy of a record captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub logger: String,
    pub level: LogLevel,
    pub message: String,
    pub cause: Option<String>,
}

/// Sink that stores every record it receives
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of all records captured so far
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Records captured at the given level
    pub fn at_level(&self, level: LogLevel) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord<'_>) {
        let captured = CapturedRecord {
            logger: record.logger.to_string(),
            level: record.level,
            message: record.message.to_string(),
            cause: record.cause.map(|cause| cause.to_string()),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(captured);
    }
}

/// Named logger gated by an `enabled` flag and, for debug output, a `verbose` flag
///
/// Calls are no-ops when the relevant flag is off. Cloning is cheap and clones
/// share the same sink.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    enabled: bool,
    verbose: bool,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger writing to [`TracingSink`]
    pub fn new(name: impl Into<Arc<str>>, enabled: bool, verbose: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            verbose,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the sink records are sent to
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Same flags and sink under a different name
    pub fn named(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Info, message.as_ref(), None);
    }

    /// Debug output requires both `enabled` and `verbose`
    pub fn debug(&self, message: impl AsRef<str>) {
        if self.verbose {
            self.emit(LogLevel::Debug, message.as_ref(), None);
        }
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Warn, message.as_ref(), None);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(LogLevel::Error, message.as_ref(), None);
    }

    /// Error record with the error that caused it attached
    pub fn error_with(&self, message: impl AsRef<str>, cause: &(dyn Error + 'static)) {
        self.emit(LogLevel::Error, message.as_ref(), Some(cause));
    }

    fn emit(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        if !self.enabled {
            return;
        }
        self.sink.emit(&LogRecord {
            logger: &self.name,
            level,
            message,
            cause,
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
