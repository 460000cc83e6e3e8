use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for drained log records.
///
/// Implementations of this trait determine where messages go once the worker
/// thread pops them off the queue. The worker owns the sink exclusively for
/// the whole run-cycle, so implementations need no internal locking; they do
/// need to be `Send` to move onto the worker thread.
///
/// Errors returned from either method end the run-cycle: the worker stops
/// writing, discards anything still queued, and shuts down. Producers never
/// see these errors.
pub trait RecordSink: Send {
    /// Writes one message followed by the record separator.
    fn write_record(&mut self, message: &str) -> io::Result<()>;

    /// Pushes buffered records towards durable storage.
    fn flush(&mut self) -> io::Result<()>;
}

/// The production sink: a truncate-created file, one line per record.
///
/// # Examples
///
/// ```
/// use async_logger::{FileSink, RecordSink};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut sink = FileSink::create(dir.path().join("app.log")).unwrap();
/// sink.write_record("[INFO] ready").unwrap();
/// sink.flush().unwrap();
/// ```
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Creates the file at `path`, truncating any previous contents.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for FileSink {
    fn write_record(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_records_are_newline_delimited() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let mut sink = FileSink::create(&path).unwrap();
        sink.write_record("first").unwrap();
        sink.write_record("second").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        fs::write(&path, "stale contents\n").unwrap();

        let mut sink = FileSink::create(&path).unwrap();
        sink.write_record("fresh").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("sink.log");
        assert!(FileSink::create(&path).is_err());
    }
}
