//! # Async Logger
//!
//! An in-process asynchronous logging facility for desktop applications:
//!
//! * **Non-blocking producers**: `log_write` returns after a brief critical
//!   section; file I/O happens on a dedicated worker thread
//! * **Ordered output**: messages land in the sink in the exact order their
//!   enqueues took effect, across any number of producer threads
//! * **Graceful shutdown**: stopping drains everything already queued, closes
//!   the sink, and releases every thread waiting on the stop
//!
//! ## Key Properties
//!
//! * One worker thread per run-cycle; restartable after a full stop
//! * Predicate-guarded waits throughout; the worker consumes no CPU while idle
//! * Lossy while inactive: writes before `start` or after a stop request are
//!   documented no-ops, never errors
//! * Sink failures never reach producers and never hang `wait_for_stop`
//!
//! ## Main Components
//!
//! * `Logger`: lifecycle controller and producer surface
//! * `LoggerHandle`: cloneable write-only handle for components that log
//! * `RecordSink` / `FileSink`: the seam between the engine and the output file
//! * `LogBridge`: routes the `log` facade into an async logger
//! * `LogReader`: decodes the newline-delimited text sink
//!
//! ## Quick Start
//!
//! ```
//! use async_logger::Logger;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::new();
//! logger.start(dir.path().join("app.log")).unwrap();
//!
//! logger.info("vulkan instance created");
//! logger.warn("no dedicated transfer queue, falling back");
//!
//! // Hand write-only handles to components that need to log.
//! let handle = logger.handle();
//! handle.error("swapchain out of date");
//!
//! // Blocks until every accepted message is on disk.
//! logger.stop();
//! ```

pub mod async_logger;
pub mod level;
pub mod log_bridge;
pub mod log_reader;
pub mod sink;

pub use async_logger::{LifecycleState, Logger, LoggerHandle, StartError};
pub use level::Level;
pub use log_bridge::LogBridge;
pub use log_reader::{LogEntry, LogReader};
pub use sink::{FileSink, RecordSink};
