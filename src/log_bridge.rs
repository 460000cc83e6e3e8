use log::{Log, Metadata, Record, SetLoggerError};

use crate::async_logger::LoggerHandle;
use crate::level::Level;

/// Adapter that routes the `log` facade into an async logger.
///
/// Host code and third-party crates that log through `log::info!` and friends
/// end up in the same sink as direct `log_write` calls, tagged with the
/// matching level prefix. The bridge holds a [`LoggerHandle`], so it inherits
/// the handle's contract: records emitted while the logger is inactive are
/// dropped.
///
/// # Examples
///
/// ```
/// use async_logger::{LogBridge, Logger};
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::new();
/// logger.start(dir.path().join("app.log")).unwrap();
///
/// // Usually done once at application startup.
/// let bridge = LogBridge::new(logger.handle(), log::LevelFilter::Info);
/// # drop(bridge);
/// logger.stop();
/// ```
pub struct LogBridge {
    handle: LoggerHandle,
    max_level: log::LevelFilter,
}

impl LogBridge {
    pub fn new(handle: LoggerHandle, max_level: log::LevelFilter) -> Self {
        Self { handle, max_level }
    }

    /// Installs a bridge as the process-wide `log` backend.
    ///
    /// Fails if a global logger is already set; the `log` crate allows one
    /// registration per process.
    pub fn install(
        handle: LoggerHandle,
        max_level: log::LevelFilter,
    ) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(handle, max_level)))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        };
        self.handle.write_leveled(level, &record.args().to_string());
    }

    fn flush(&self) {
        // Flushing is the worker's business; nothing to do from a producer.
    }
}
