//! Severities that gate which events reach which sinks, plus the output-mode
//! variants layered on top of them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Log severity, including the three output modes.
///
/// `Verbose..Error` form a total order. The mode variants (`Parent`, `Json`,
/// `ThreadId`) are output shapes rather than severities; comparing one of them
/// by severity yields `None`, and [`Severity::base`] maps each mode onto the
/// underlying severity it inherits for ordering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// High-volume instrumentation that would be too noisy outside of development.
    Verbose,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug,
    /// Normal operational milestones.
    #[default]
    Info,
    /// Non-fatal anomalies that may need attention.
    Warn,
    /// Failures that prevent the operation from completing.
    Error,
    /// Debug output that also names the caller of the caller.
    Parent,
    /// Info output that pretty-prints a JSON payload.
    Json,
    /// Debug output tagged with the current thread identifier.
    ThreadId,
}

impl Severity {
    /// Single-character code used in persisted file lines.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Verbose => 'V',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
            Self::Parent => 'P',
            Self::Json => 'J',
            Self::ThreadId => 'T',
        }
    }

    /// Lowercase because config files and log file names use lowercase labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Parent => "parent",
            Self::Json => "json",
            Self::ThreadId => "thread",
        }
    }

    /// The underlying severity a mode variant inherits when ordering matters.
    #[must_use]
    pub const fn base(self) -> Self {
        match self {
            Self::Parent | Self::ThreadId => Self::Debug,
            Self::Json => Self::Info,
            other => other,
        }
    }

    /// Whether this is an output-mode variant rather than a plain severity.
    #[must_use]
    pub const fn is_mode(self) -> bool {
        matches!(self, Self::Parent | Self::Json | Self::ThreadId)
    }

    /// Convenience for iteration, used by config parsing and tests.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Verbose,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Parent,
            Self::Json,
            Self::ThreadId,
        ]
    }

    /// The five plain severities without the mode variants.
    #[must_use]
    pub const fn standard() -> [Self; 5] {
        [
            Self::Verbose,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
        ]
    }

    const fn rank(self) -> u8 {
        match self.base() {
            Self::Verbose => 0,
            Self::Debug => 1,
            Self::Info => 2,
            Self::Warn => 3,
            _ => 4,
        }
    }
}

impl PartialOrd for Severity {
    /// Mode variants are not comparable by severity.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_mode() || other.is_mode() {
            return None;
        }
        Some(self.rank().cmp(&other.rank()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown severity" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: '{}'", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" | "v" => Ok(Self::Verbose),
            "debug" | "d" => Ok(Self::Debug),
            "info" | "i" => Ok(Self::Info),
            "warn" | "warning" | "w" => Ok(Self::Warn),
            "error" | "err" | "e" => Ok(Self::Error),
            "parent" | "p" => Ok(Self::Parent),
            "json" | "j" => Ok(Self::Json),
            "thread" | "thread_id" | "t" => Ok(Self::ThreadId),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
