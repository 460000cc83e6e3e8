use std::fs;
use std::thread;
use std::time::Instant;

use async_logger::{LifecycleState, Logger};
use tracing::info;

const LINES: usize = 50_000;

fn main() {
    // Clean up outputs from previous runs
    for name in ["compare_async.log", "compare_tracing.log"] {
        let _ = fs::remove_file(name);
    }

    println!("Writing {} lines through async_logger...", LINES);
    let logger = Logger::new();
    logger.start("compare_async.log").unwrap();
    while logger.state() != LifecycleState::Running {
        thread::yield_now();
    }

    let start = Instant::now();
    for i in 0..LINES {
        logger.info(&format!("line {} from the async worker", i));
    }
    logger.stop();
    println!("async_logger: {:?} (drained and closed)", start.elapsed());

    println!("Writing {} lines through tracing-appender...", LINES);
    let appender = tracing_appender::rolling::never(".", "compare_tracing.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let start = Instant::now();
    for i in 0..LINES {
        info!("line {} from the tracing appender", i);
    }
    // Dropping the guard flushes and joins the appender's worker.
    drop(guard);
    println!("tracing-appender: {:?} (flushed)", start.elapsed());

    println!("Done. Compare the files with: ls -lh compare_*.log");
}
