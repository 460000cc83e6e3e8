use std::collections::VecDeque;
use std::error;
use std::fmt;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::level::Level;
use crate::sink::{FileSink, RecordSink};

/// Core implementation of the asynchronous logging system.
///
/// This module provides the Logger struct: a producer/consumer pipeline where
/// any number of caller threads hand off text messages and a single dedicated
/// worker thread drains them into the output sink.

/// Lifecycle of the worker thread, shared by all threads under one mutex.
///
/// Transitions within one run-cycle are monotonic:
/// `Stopped → Starting → Running → Stopping → Stopped`. The only shortcut is
/// `Starting → Stopping`, taken when a stop is requested before the worker
/// thread has executed its first instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No worker is alive; `start` is accepted.
    Stopped,
    /// `start` has spawned the worker but it has not begun processing yet.
    Starting,
    /// The worker is draining the queue; `log_write` is accepted.
    Running,
    /// A stop was requested; the worker is finishing already-queued messages.
    Stopping,
}

/// Errors returned synchronously by [`Logger::start`].
///
/// Nothing the worker does after a successful start is ever surfaced to
/// producers; a sink write failure mid-run is fatal for the run-cycle but
/// silent from the caller's perspective.
#[derive(Debug)]
pub enum StartError {
    /// `start` was called while a run-cycle was still active.
    AlreadyActive,
    /// The output sink could not be created. No worker was spawned.
    SinkUnavailable(io::Error),
    /// The OS refused to spawn the worker thread. The sink has been closed
    /// again and the logger is back in `Stopped`.
    WorkerSpawn(io::Error),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::AlreadyActive => write!(f, "logger is already active"),
            StartError::SinkUnavailable(e) => write!(f, "failed to create log sink: {}", e),
            StartError::WorkerSpawn(e) => write!(f, "failed to spawn worker thread: {}", e),
        }
    }
}

impl error::Error for StartError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            StartError::AlreadyActive => None,
            StartError::SinkUnavailable(e) | StartError::WorkerSpawn(e) => Some(e),
        }
    }
}

/// State shared between producers, the worker, and stop-waiters.
///
/// The lifecycle state and the message queue live under a single mutex so
/// that "is the logger running" and "enqueue this message" are one atomic
/// step. Two condvars hang off that mutex: `work_ready` wakes the worker,
/// `stopped` releases threads blocked in `wait_for_stop`.
struct Shared {
    inner: Mutex<Inner>,
    work_ready: Condvar,
    stopped: Condvar,
}

struct Inner {
    state: LifecycleState,
    queue: VecDeque<String>,
}

impl Shared {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: LifecycleState::Stopped,
                queue: VecDeque::new(),
            }),
            work_ready: Condvar::new(),
            stopped: Condvar::new(),
        }
    }

    fn log_write(&self, message: String) {
        let mut inner = self.inner.lock();
        if inner.state != LifecycleState::Running {
            // Documented drop: the logger is lossy while inactive.
            return;
        }
        inner.queue.push_back(message);
        drop(inner);
        self.work_ready.notify_one();
    }

    fn write_leveled(&self, level: Level, message: &str) {
        self.log_write(format!("{} {}", level.prefix(), message));
    }

    fn request_stop(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            LifecycleState::Stopping | LifecycleState::Stopped => return,
            _ => inner.state = LifecycleState::Stopping,
        }
        drop(inner);
        self.work_ready.notify_all();
    }
}

/// An asynchronous logger backed by a dedicated worker thread.
///
/// Producers call [`log_write`](Logger::log_write) (or the leveled wrappers)
/// and return after a brief critical section; the worker thread owns the
/// output sink and writes queued messages in arrival order. Stopping is
/// cooperative: [`request_stop`](Logger::request_stop) lets the worker finish
/// draining whatever is already queued before it closes the sink, and
/// [`wait_for_stop`](Logger::wait_for_stop) blocks until that has happened.
///
/// # Thread Safety
///
/// `Logger` is fully thread-safe. Share it by reference, or hand out
/// [`LoggerHandle`]s to components that should be able to write but not
/// control the lifecycle.
///
/// # Message Loss
///
/// `log_write` while the logger is not `Running` is a documented no-op.
/// Every message accepted while `Running` is written to the sink before
/// `wait_for_stop` returns. A process crash before the worker drains its
/// queue may lose buffered messages.
///
/// # Examples
///
/// ```
/// use async_logger::Logger;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::new();
/// logger.start(dir.path().join("app.log")).unwrap();
///
/// logger.info("renderer initialized");
/// logger.log_write("[LAYER] validation: swapchain recreated");
///
/// // Blocks until every accepted message is on disk and the file is closed.
/// logger.stop();
/// ```
pub struct Logger {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Logger {
    /// Creates a logger in the `Stopped` state. No thread is spawned and no
    /// file is touched until [`start`](Logger::start).
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            worker: Mutex::new(None),
        }
    }

    /// Starts a new run-cycle writing to the file at `path`.
    ///
    /// The file is created fresh (an existing file is truncated) and handed
    /// to the worker thread, which owns it until the cycle ends. Returns
    /// without blocking; the worker flips the state to `Running` as its first
    /// action.
    ///
    /// # Errors
    ///
    /// * [`StartError::AlreadyActive`] if a run-cycle is still active.
    /// * [`StartError::SinkUnavailable`] if the file cannot be created; no
    ///   worker is spawned and the logger stays `Stopped`.
    pub fn start(&self, path: impl AsRef<Path>) -> Result<(), StartError> {
        let mut inner = self.shared.inner.lock();
        if inner.state != LifecycleState::Stopped {
            return Err(StartError::AlreadyActive);
        }
        self.join_stale_worker();
        let sink = FileSink::create(path).map_err(StartError::SinkUnavailable)?;
        self.spawn_worker(&mut inner, Box::new(sink))
    }

    /// Starts a new run-cycle draining into a caller-built sink.
    ///
    /// Same contract as [`start`](Logger::start), minus the file handling.
    /// This is the seam tests use to substitute in-memory sinks.
    pub fn start_with_sink(&self, sink: Box<dyn RecordSink>) -> Result<(), StartError> {
        let mut inner = self.shared.inner.lock();
        if inner.state != LifecycleState::Stopped {
            return Err(StartError::AlreadyActive);
        }
        self.join_stale_worker();
        self.spawn_worker(&mut inner, sink)
    }

    /// Asks the worker to finish draining and shut down. Non-blocking.
    ///
    /// Idempotent: calling this from `Stopping` or `Stopped` does nothing.
    /// Messages already queued are still written; `log_write` calls from this
    /// point on are dropped.
    pub fn request_stop(&self) {
        self.shared.request_stop();
    }

    /// Blocks until the worker has closed the sink and reached `Stopped`,
    /// then joins its thread.
    ///
    /// Safe to call repeatedly and from multiple threads; every caller is
    /// released once the state reaches `Stopped`, and exactly one of them
    /// performs the join. When this returns, no further writes to the sink
    /// can occur.
    pub fn wait_for_stop(&self) {
        let mut inner = self.shared.inner.lock();
        while inner.state != LifecycleState::Stopped {
            self.shared.stopped.wait(&mut inner);
        }
        // Still under the state lock, so a concurrent `start` cannot swap in
        // the next cycle's worker between the state check and the join.
        self.join_stale_worker();
    }

    /// [`request_stop`](Logger::request_stop) followed by
    /// [`wait_for_stop`](Logger::wait_for_stop).
    pub fn stop(&self) {
        self.request_stop();
        self.wait_for_stop();
    }

    /// Appends a message to the queue and wakes the worker.
    ///
    /// If the logger is not `Running` the message is silently dropped; this
    /// is the documented behavior, not an error. Never blocks beyond the
    /// internal critical section and never surfaces sink errors.
    pub fn log_write(&self, message: impl Into<String>) {
        self.shared.log_write(message.into());
    }

    /// Logs a message prefixed with the given severity tag.
    pub fn write_leveled(&self, level: Level, message: &str) {
        self.shared.write_leveled(level, message);
    }

    /// Logs an `[ERROR]`-tagged message.
    pub fn error(&self, message: &str) {
        self.write_leveled(Level::Error, message);
    }

    /// Logs a `[WARN]`-tagged message.
    pub fn warn(&self, message: &str) {
        self.write_leveled(Level::Warn, message);
    }

    /// Logs an `[INFO]`-tagged message.
    pub fn info(&self, message: &str) {
        self.write_leveled(Level::Info, message);
    }

    /// Logs a `[DEBUG]`-tagged message.
    pub fn debug(&self, message: &str) {
        self.write_leveled(Level::Debug, message);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.shared.inner.lock().state
    }

    /// Returns a cloneable producer handle.
    ///
    /// Handles can write but cannot start or stop the logger; pass them to
    /// components that need to log (window procedures, API callbacks) while
    /// the application owns the `Logger` itself.
    pub fn handle(&self) -> LoggerHandle {
        LoggerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Joins a worker thread that has already reached its terminal state but
    /// has not been reaped yet. `Option::take` makes the join exactly-once
    /// even with concurrent callers.
    fn join_stale_worker(&self) {
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }

    fn spawn_worker(
        &self,
        inner: &mut Inner,
        sink: Box<dyn RecordSink>,
    ) -> Result<(), StartError> {
        inner.state = LifecycleState::Starting;
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("async-logger-worker".into())
            .spawn(move || worker_loop(shared, sink));
        match spawned {
            Ok(handle) => {
                *self.worker.lock() = Some(handle);
                Ok(())
            }
            Err(e) => {
                inner.state = LifecycleState::Stopped;
                Err(StartError::WorkerSpawn(e))
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // No leaked thread and no open sink survive the logger.
        self.stop();
    }
}

/// A cloneable write-only handle to a [`Logger`].
///
/// Carries the same `log_write` contract as the logger it came from and stays
/// valid across run-cycles: writes issued while the logger is inactive are
/// dropped, writes issued while it is `Running` are delivered.
#[derive(Clone)]
pub struct LoggerHandle {
    shared: Arc<Shared>,
}

impl LoggerHandle {
    /// See [`Logger::log_write`].
    pub fn log_write(&self, message: impl Into<String>) {
        self.shared.log_write(message.into());
    }

    /// See [`Logger::write_leveled`].
    pub fn write_leveled(&self, level: Level, message: &str) {
        self.shared.write_leveled(level, message);
    }

    /// Logs an `[ERROR]`-tagged message.
    pub fn error(&self, message: &str) {
        self.write_leveled(Level::Error, message);
    }

    /// Logs a `[WARN]`-tagged message.
    pub fn warn(&self, message: &str) {
        self.write_leveled(Level::Warn, message);
    }

    /// Logs an `[INFO]`-tagged message.
    pub fn info(&self, message: &str) {
        self.write_leveled(Level::Info, message);
    }

    /// Logs a `[DEBUG]`-tagged message.
    pub fn debug(&self, message: &str) {
        self.write_leveled(Level::Debug, message);
    }
}

/// The consumer side: runs on the dedicated worker thread, owns the sink.
///
/// Waits are predicate-guarded (queue non-empty, or state left `Running`), so
/// spurious wakeups and signals fired before the wait began are both
/// harmless. Batches are written with the lock released; producers enqueue
/// behind the batch and total order is preserved.
fn worker_loop(shared: Arc<Shared>, mut sink: Box<dyn RecordSink>) {
    let mut inner = shared.inner.lock();

    if inner.state == LifecycleState::Stopping {
        // Stop was requested before this thread got to run: close the sink
        // without processing anything.
        drop(sink);
        inner.state = LifecycleState::Stopped;
        drop(inner);
        shared.stopped.notify_all();
        return;
    }
    inner.state = LifecycleState::Running;

    loop {
        if !inner.queue.is_empty() {
            let batch = std::mem::take(&mut inner.queue);
            drop(inner);
            let ok = write_batch(sink.as_mut(), &batch);
            inner = shared.inner.lock();
            if !ok {
                // Sink is broken: stop accepting work and discard the rest.
                // The terminal transition below still runs, so stop-waiters
                // are never left hanging.
                inner.state = LifecycleState::Stopping;
                inner.queue.clear();
                break;
            }
            continue;
        }
        if inner.state != LifecycleState::Running {
            break;
        }
        shared.work_ready.wait(&mut inner);
    }

    drop(sink);
    inner.state = LifecycleState::Stopped;
    drop(inner);
    shared.stopped.notify_all();
}

/// Writes one drained batch, containing any panic a sink implementation
/// throws. Returns false on the first failure; the caller tears the
/// run-cycle down.
fn write_batch(sink: &mut dyn RecordSink, batch: &VecDeque<String>) -> bool {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        for message in batch {
            sink.write_record(message)?;
        }
        sink.flush()
    }));
    matches!(outcome, Ok(Ok(())))
}
