//! Logging for the provider process and for function calls.
//!
//! The process logs through the `log` facade, backed by log4rs. Functions
//! never touch the facade directly: they receive a [`Logger`] inside their
//! [`CallContext`], so tests can capture what a call reported.

use log::{Level, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;
use std::sync::Mutex;

/// Sink for diagnostics emitted while a function runs.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// Forwards to the global `log` facade under the `foxfunx::call` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogForwarder;

impl Logger for LogForwarder {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: "foxfunx::call", level, "{message}");
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records logged so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push((level, message.to_string()));
    }
}

/// Per-call context handed to [`crate::functions::Function::run`].
#[derive(Clone, Copy)]
pub struct CallContext<'a> {
    pub logger: &'a dyn Logger,
}

impl<'a> CallContext<'a> {
    pub fn new(logger: &'a dyn Logger) -> Self {
        CallContext { logger }
    }
}

impl std::fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext").finish_non_exhaustive()
    }
}

/// Initialize log4rs for the provider process.
///
/// Uses `log_config` when that file exists, otherwise logs to stderr at
/// `level`. Stdout carries the plugin protocol and must stay clean.
pub fn init_logging(log_config: &Path, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    if log_config.exists() {
        log4rs::init_file(log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {}: {e}", log_config.display()))?;
        log::debug!("log4rs initialized from {}", log_config.display());
        return Ok(());
    }

    let config = stderr_config(level)?;
    log4rs::init_config(config).map_err(|e| format!("Error initializing log4rs: {e}"))?;
    log::debug!("log4rs initialized on stderr at level {level}");
    Ok(())
}

fn stderr_config(level: LevelFilter) -> Result<log4rs::Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();

    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| format!("Invalid log4rs config: {e}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_logger_keeps_order() {
        let logger = RecordingLogger::new();
        let ctx = CallContext::new(&logger);
        ctx.logger.debug("first");
        ctx.logger.error("second");
        assert_eq!(
            logger.records(),
            vec![
                (Level::Debug, "first".to_string()),
                (Level::Error, "second".to_string())
            ]
        );
    }

    #[test]
    fn test_stderr_config_builds() {
        let config = stderr_config(LevelFilter::Debug).expect("config should build");
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}
