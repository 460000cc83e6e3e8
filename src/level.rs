use std::fmt;

/// Severity tags for leveled log messages.
///
/// Levels are pure formatting: a leveled write is `"[TAG] message"` handed to
/// `log_write`, nothing more. Ordering follows severity (`Error` is lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// The tag prepended to leveled messages.
    pub fn prefix(self) -> &'static str {
        match self {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN]",
            Level::Info => "[INFO]",
            Level::Debug => "[DEBUG]",
        }
    }

    /// Parses a tag back into a level. Used when reading logs.
    pub fn from_prefix(tag: &str) -> Option<Level> {
        match tag {
            "[ERROR]" => Some(Level::Error),
            "[WARN]" => Some(Level::Warn),
            "[INFO]" => Some(Level::Info),
            "[DEBUG]" => Some(Level::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_round_trip() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(Level::from_prefix(level.prefix()), Some(level));
        }
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(Level::from_prefix("[LAYER]"), None);
        assert_eq!(Level::from_prefix("INFO"), None);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }
}
