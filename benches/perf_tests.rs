use async_logger::{LifecycleState, Logger};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log::{info, LevelFilter};
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::env;
use std::fs;
use std::sync::Once;
use std::thread;
use std::time::Instant;
use tempfile::tempdir;

const ITERATIONS: usize = 20_000;

static LOGGER_INIT: Once = Once::new();

fn setup_log4rs(log_file: &str) {
    LOGGER_INIT.call_once(|| {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(true)
            .build(log_file)
            .unwrap();

        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder().appender("logfile").build(LevelFilter::Info))
            .unwrap();

        log4rs::init_config(config).unwrap();
    });
}

fn wait_until_running(logger: &Logger) {
    while logger.state() != LifecycleState::Running {
        thread::yield_now();
    }
}

fn bench_logging_comparison(c: &mut Criterion) {
    // The log4rs side lives outside the per-iteration tempdir because its
    // global config can only be installed once per process.
    let sync_log = env::temp_dir().join("async_logger_bench_sync.log");
    let _ = fs::remove_file(&sync_log);

    let mut group = c.benchmark_group("Logging Comparison");
    group.sample_size(10); // Fewer samples due to I/O operations

    group.bench_function("async_vs_sync", |b| {
        b.iter(|| {
            let dir = tempdir().unwrap();

            // Async logger: measure the producer side alone, then the full
            // cycle including drain and close.
            let logger = Logger::new();
            logger.start(dir.path().join("async.log")).unwrap();
            wait_until_running(&logger);

            let async_start = Instant::now();
            for i in 0..ITERATIONS {
                logger.log_write(format!("Test perf: iteration={}", i));
            }
            let enqueue_duration = async_start.elapsed();
            logger.stop();
            let drained_duration = async_start.elapsed();

            // Synchronous log4rs file appender for comparison.
            setup_log4rs(sync_log.to_str().unwrap());
            let sync_start = Instant::now();
            for i in 0..ITERATIONS {
                info!("Test perf: iteration={}", i);
            }
            let sync_duration = sync_start.elapsed();

            println!("\nPerformance comparison ({} messages):", ITERATIONS);
            println!("Async enqueue (producer side): {:?}", enqueue_duration);
            println!("Async full cycle (drained):    {:?}", drained_duration);
            println!("Sync log4rs (with I/O):        {:?}", sync_duration);
            println!(
                "Producer-side speedup: {:.2}x",
                sync_duration.as_secs_f64() / enqueue_duration.as_secs_f64()
            );
            println!(
                "Enqueue throughput: {:.2} million msgs/sec",
                ITERATIONS as f64 / enqueue_duration.as_secs_f64() / 1_000_000.0
            );

            black_box((enqueue_duration, drained_duration, sync_duration))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_logging_comparison);
criterion_main!(benches);
