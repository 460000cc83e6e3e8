use async_logger::{LifecycleState, LogBridge, Logger, RecordSink};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::thread;

#[derive(Clone, Default)]
struct MemorySink {
    records: Arc<Mutex<Vec<String>>>,
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, message: &str) -> io::Result<()> {
        self.records.lock().push(message.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The `log` crate accepts one global logger per process, so everything the
// bridge does is exercised from a single test.
#[test]
fn test_bridge_routes_facade_records() {
    let sink = MemorySink::default();
    let logger = Logger::new();
    logger.start_with_sink(Box::new(sink.clone())).unwrap();
    while logger.state() != LifecycleState::Running {
        thread::yield_now();
    }

    LogBridge::install(logger.handle(), log::LevelFilter::Info).unwrap();

    log::error!("device lost");
    log::info!("frame {} presented", 42);
    log::debug!("filtered out by max level");
    log::trace!("also filtered");

    logger.stop();

    let records = sink.records.lock().clone();
    assert_eq!(
        records,
        vec![
            "[ERROR] device lost".to_string(),
            "[INFO] frame 42 presented".to_string(),
        ]
    );

    // The bridge keeps the handle's lossy-when-inactive contract: the logger
    // is stopped now, so facade records go nowhere and nothing panics.
    log::error!("dropped, logger stopped");
    assert_eq!(sink.records.lock().len(), 2);
}
