use crate::level::Level;

/// Reader for the newline-delimited text logs this crate writes.
///
/// Each line in the sink is one record: an optional severity tag followed by
/// the message text. The reader splits the two apart so tooling and tests can
/// filter by level without string-matching tags themselves.

/// A single decoded log record.
#[derive(Debug, PartialEq, Eq)]
pub struct LogEntry<'a> {
    /// The parsed severity tag, if the line carries a known one.
    pub level: Option<Level>,
    /// The message text with any recognized tag stripped.
    pub message: &'a str,
    /// The full line as written.
    pub raw: &'a str,
}

/// Sequential reader over the contents of a log file.
///
/// # Examples
///
/// ```
/// use async_logger::{Level, LogReader};
///
/// let mut reader = LogReader::new("[INFO] ready\nuntagged line\n");
///
/// let first = reader.read_entry().unwrap();
/// assert_eq!(first.level, Some(Level::Info));
/// assert_eq!(first.message, "ready");
///
/// let second = reader.read_entry().unwrap();
/// assert_eq!(second.level, None);
/// assert_eq!(second.message, "untagged line");
///
/// assert!(reader.read_entry().is_none());
/// ```
pub struct LogReader<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> LogReader<'a> {
    /// Creates a reader over the full contents of a log file.
    pub fn new(data: &'a str) -> Self {
        Self {
            lines: data.lines(),
        }
    }

    /// Reads the next record, or `None` at end of input.
    pub fn read_entry(&mut self) -> Option<LogEntry<'a>> {
        let raw = self.lines.next()?;
        let (level, message) = split_tag(raw);
        Some(LogEntry {
            level,
            message,
            raw,
        })
    }
}

/// Splits a leading `[TAG] ` off a line when the tag names a known level.
/// Unknown tags (the host also writes `[LAYER]` lines) stay in the message.
fn split_tag(line: &str) -> (Option<Level>, &str) {
    if let Some(end) = line.find(']') {
        if line.starts_with('[') {
            if let Some(level) = Level::from_prefix(&line[..=end]) {
                let rest = line[end + 1..].strip_prefix(' ').unwrap_or(&line[end + 1..]);
                return (Some(level), rest);
            }
        }
    }
    (None, line)
}
