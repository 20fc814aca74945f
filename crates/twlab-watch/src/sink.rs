//! Destination for the supervised tool's output lines

use tracing::{Level, debug, error, info, trace, warn};

/// Which pipe a line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Severity lines from this stream are forwarded at.
    ///
    /// tailwindcss reports warnings and rebuild errors on stderr without
    /// exiting, so stderr maps to WARN rather than ERROR.
    pub fn level(self) -> Level {
        match self {
            Stream::Stdout => Level::DEBUG,
            Stream::Stderr => Level::WARN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// Receives each complete output line, unmodified
pub trait LineSink: Send + Sync + 'static {
    fn emit(&self, level: Level, line: &str);
}

/// Forwards lines to `tracing`, tagged with the tool name
#[derive(Debug, Clone)]
pub struct TracingSink {
    tool: String,
}

impl TracingSink {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("tailwindcss")
    }
}

impl LineSink for TracingSink {
    fn emit(&self, level: Level, line: &str) {
        let tool = self.tool.as_str();
        match level {
            Level::ERROR => error!(tool, "{}", line),
            Level::WARN => warn!(tool, "{}", line),
            Level::INFO => info!(tool, "{}", line),
            Level::DEBUG => debug!(tool, "{}", line),
            _ => trace!(tool, "{}", line),
        }
    }
}
