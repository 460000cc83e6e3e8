use std::io;
use std::thread;

use async_logger::{LifecycleState, Logger};

fn main() -> io::Result<()> {
    let logger = Logger::new();

    // A failed start must not take the application down; run without logging.
    if let Err(e) = logger.start("async_logger.log") {
        eprintln!("logging disabled: {}", e);
        return Ok(());
    }

    // Writes are accepted once the worker reaches Running; anything sent
    // before that is dropped by contract.
    while logger.state() != LifecycleState::Running {
        thread::yield_now();
    }

    logger.info("logger started");
    let handle = logger.handle();
    handle.debug("handles can log from anywhere");
    handle.warn("this is what a warning looks like");
    logger.log_write("[LAYER] untagged subsystems can bring their own prefix");

    logger.stop();
    println!("wrote async_logger.log");
    Ok(())
}
