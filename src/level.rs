//! Severities a record can carry and the verbosity values that select which
//! of them are written.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

use crate::{Error, Result};

/// Severity of a single record, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Exits the process after the record is written.
    Fatal,
    /// Panics after the record is written.
    Panic,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    /// Upper-case label used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
        }
    }

    /// The `tracing` level a record of this severity is emitted at.
    ///
    /// `tracing` has nothing above `ERROR`, so fatal and panic records travel
    /// at that level and are told apart by their `severity` field.
    pub fn tracing_level(&self) -> Level {
        match self {
            Severity::Trace => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Fatal | Severity::Panic => Level::ERROR,
        }
    }

    pub(crate) fn from_tracing_level(level: &Level) -> Self {
        match *level {
            Level::TRACE => Severity::Trace,
            Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Info,
            Level::WARN => Severity::Warn,
            Level::ERROR => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "panic" => Ok(Severity::Panic),
            other => Err(Error::Config(format!("unknown severity: {other}"))),
        }
    }
}

/// How much a logger writes.
///
/// - `0`: info, warnings and errors
/// - `1`: adds debug records
/// - `2`: adds trace records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    #[default]
    Default,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn as_u8(&self) -> u8 {
        match self {
            Verbosity::Default => 0,
            Verbosity::Debug => 1,
            Verbosity::Trace => 2,
        }
    }

    /// The least severe record that is still written.
    pub fn min_severity(&self) -> Severity {
        match self {
            Verbosity::Default => Severity::Info,
            Verbosity::Debug => Severity::Debug,
            Verbosity::Trace => Severity::Trace,
        }
    }

    /// Whether a record of `severity` passes this verbosity.
    pub fn allows(&self, severity: Severity) -> bool {
        severity >= self.min_severity()
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.min_severity().tracing_level())
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Verbosity::Default),
            1 => Ok(Verbosity::Debug),
            2 => Ok(Verbosity::Trace),
            other => Err(Error::Config(format!(
                "verbosity must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<Verbosity> for u8 {
    fn from(verbosity: Verbosity) -> Self {
        verbosity.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(format!("{:>5}", Severity::Warn), " WARN");
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("Debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_fatal_and_panic_travel_as_error() {
        assert_eq!(Severity::Fatal.tracing_level(), Level::ERROR);
        assert_eq!(Severity::Panic.tracing_level(), Level::ERROR);
        assert_eq!(
            Severity::from_tracing_level(&Level::WARN),
            Severity::Warn
        );
    }

    #[test]
    fn test_verbosity_try_from() {
        assert_eq!(Verbosity::try_from(0).unwrap(), Verbosity::Default);
        assert_eq!(Verbosity::try_from(1).unwrap(), Verbosity::Debug);
        assert_eq!(Verbosity::try_from(2).unwrap(), Verbosity::Trace);
        assert!(matches!(Verbosity::try_from(3), Err(Error::Config(_))));
    }

    #[test]
    fn test_verbosity_thresholds() {
        assert_eq!(Verbosity::Default.min_severity(), Severity::Info);
        assert_eq!(Verbosity::Debug.min_severity(), Severity::Debug);
        assert_eq!(Verbosity::Trace.min_severity(), Severity::Trace);

        assert!(!Verbosity::Default.allows(Severity::Debug));
        assert!(Verbosity::Default.allows(Severity::Panic));
        assert!(!Verbosity::Debug.allows(Severity::Trace));
        assert!(Verbosity::Trace.allows(Severity::Trace));
    }

    #[test]
    fn test_verbosity_level_filter() {
        assert_eq!(Verbosity::Default.level_filter(), LevelFilter::INFO);
        assert_eq!(Verbosity::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::TRACE);
        assert_eq!(u8::from(Verbosity::Trace), 2);
    }
}
