//! Pluggable leveled logging for request/response diagnostics.
//!
//! The client logs every request and response at debug level through a
//! [`Logger`]. The default is [`TracingLogger`], which forwards to the
//! `tracing` macros. [`StreamLogger`] writes plain `[LEVEL] message` lines to a
//! pair of writers, filtered by a minimum [`LogLevel`].
//!
//! # Example
//!
//! ```rust
//! use shopify_rest::{LogLevel, Logger, StreamLogger};
//!
//! let logger = StreamLogger::new(LogLevel::Warn);
//! logger.debug(format_args!("filtered out"));
//! assert!(logger.enabled(LogLevel::Error));
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Log severity, ordered from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Failures.
    Error,
    /// Recoverable problems.
    Warn,
    /// Notable events.
    Info,
    /// Request/response traces.
    Debug,
}

impl LogLevel {
    const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// A leveled log sink.
///
/// Implementations must never fail the caller; write errors are dropped.
pub trait Logger: Send + Sync {
    /// Records a message at the given level.
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// Records an error.
    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Records a warning.
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Records an informational message.
    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Records a debug message.
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }
}

/// Forwards records to `tracing` under the `shopify_rest` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        match level {
            LogLevel::Error => tracing::error!(target: "shopify_rest", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "shopify_rest", "{}", args),
            LogLevel::Info => tracing::info!(target: "shopify_rest", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "shopify_rest", "{}", args),
        }
    }
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Writes error/warn lines to one writer and info/debug lines to another.
///
/// By default these are stderr and stdout. A `None` level silences the
/// logger entirely.
pub struct StreamLogger {
    level: Option<LogLevel>,
    out: Sink,
    err: Sink,
}

impl StreamLogger {
    /// Creates a logger on stdout/stderr that emits `level` and above.
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self::with_writers(Some(level), io::stdout(), io::stderr())
    }

    /// Creates a logger that emits nothing.
    #[must_use]
    pub fn silent() -> Self {
        Self::with_writers(None, io::sink(), io::sink())
    }

    /// Creates a logger on custom writers.
    ///
    /// `out` receives info/debug lines, `err` receives error/warn lines.
    #[must_use]
    pub fn with_writers(
        level: Option<LogLevel>,
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
    ) -> Self {
        Self {
            level,
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
        }
    }

    /// Returns `true` if records at `level` are emitted.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.is_some_and(|min| level <= min)
    }
}

impl Default for StreamLogger {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for StreamLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamLogger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl Logger for StreamLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let sink = match level {
            LogLevel::Error | LogLevel::Warn => &self.err,
            LogLevel::Info | LogLevel::Debug => &self.out,
        };
        let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "[{}] {}", level.label(), args);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    /// A cloneable in-memory writer for inspecting log output.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_routes_levels_to_streams() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let logger = StreamLogger::with_writers(Some(LogLevel::Debug), out.clone(), err.clone());

        logger.error(format_args!("not a {}", "joke"));
        logger.warn(format_args!("warn"));
        logger.info(format_args!("info"));
        logger.debug(format_args!("debug"));

        assert_eq!(err.contents(), "[ERROR] not a joke\n[WARN] warn\n");
        assert_eq!(out.contents(), "[INFO] info\n[DEBUG] debug\n");
    }

    #[test]
    fn test_filters_below_minimum_level() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let logger = StreamLogger::with_writers(Some(LogLevel::Warn), out.clone(), err.clone());

        logger.info(format_args!("info"));
        logger.debug(format_args!("debug"));
        logger.warn(format_args!("warn"));

        assert_eq!(out.contents(), "");
        assert_eq!(err.contents(), "[WARN] warn\n");
    }

    #[test]
    fn test_silent_logger_emits_nothing() {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let logger = StreamLogger::with_writers(None, out.clone(), err.clone());

        logger.error(format_args!("error"));
        assert_eq!(err.contents(), "");
        assert!(!StreamLogger::default().enabled(LogLevel::Error));
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let logger = StreamLogger::with_writers(Some(LogLevel::Debug), FailingWriter, FailingWriter);
        logger.error(format_args!("dropped"));
        logger.debug(format_args!("dropped"));
    }

    #[test]
    fn test_tracing_logger_without_subscriber_is_noop() {
        TracingLogger.info(format_args!("no subscriber installed"));
    }
}
