//! Injected logging sink.
//!
//! Every component takes a `&dyn LogSink` explicitly instead of writing to a
//! process-wide logger, so tests can capture log calls with a recording
//! double and the binary can fan out to a file and stderr at once.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;

/// Severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Sink interface for extraction/validation log events.
///
/// Implementors can append to files, write to stderr, or record events for
/// assertions in tests.
pub trait LogSink: Send + Sync {
    /// Record one event at the given level.
    fn log(&self, level: LogLevel, message: &str);

    /// Record an informational event.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Record a warning.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    /// Record an error.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// A sink that fans out events to a list of sinks.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl CompositeSink {
    /// Create a new composite sink from a list of sinks.
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl fmt::Debug for CompositeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSink")
            .field("sinks_len", &self.sinks.len())
            .finish()
    }
}

impl LogSink for CompositeSink {
    fn log(&self, level: LogLevel, message: &str) {
        for s in &self.sinks {
            s.log(level, message);
        }
    }
}

/// Logs events to stderr.
#[derive(Debug, Default)]
pub struct StdErrSink;

impl LogSink for StdErrSink {
    fn log(&self, level: LogLevel, message: &str) {
        eprintln!("[{level}] {message}");
    }
}

/// Appends events to a local log file, one line per event, formatted as
/// `<timestamp> - <LEVEL> - <message>`.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    /// Create a file sink that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LogSink for FileSink {
    fn log(&self, level: LogLevel, message: &str) {
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.append_line(&format!("{ts} - {level} - {message}"));
    }
}
