use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::Dispatch;
use tracing::dispatcher;

use crate::{LogConfig, LoggerBuilder, Result, Severity, Verbosity};

/// A logger that tags every record it writes with a fixed prefix.
///
/// Each instance owns its own dispatcher, so loggers with different
/// verbosities coexist in one process and nothing is installed globally.
/// Clones share the dispatcher.
///
/// Every severity has three call shapes:
///
/// - `info(&[&a, &b])` joins the arguments with spaces,
/// - `infoln(&[&a, &b])` does the same and writes the message as a whole line,
/// - `infof(format_args!(..))` writes the formatted arguments.
///
/// ```rust
/// use prefixlog::Logger;
///
/// let log = Logger::new("server", 1)?;
/// log.debug(&[&"listening on", &8080]);
/// log.infof(format_args!("{} workers ready", 4));
/// # Ok::<(), prefixlog::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    prefix: Arc<str>,
    verbosity: Verbosity,
    dispatch: Dispatch,
}

macro_rules! leveled {
    ($severity:expr, $name:literal, $plain:ident, $line:ident, $formatted:ident) => {
        #[doc = concat!("Write a ", $name, " record from space-joined arguments.")]
        pub fn $plain(&self, args: &[&dyn fmt::Display]) {
            self.emit($severity, format_args!("{}", join(args)));
        }

        #[doc = concat!("Write a ", $name, " record from space-joined arguments, as a whole line.")]
        pub fn $line(&self, args: &[&dyn fmt::Display]) {
            self.emit($severity, format_args!("{}", join_line(args)));
        }

        #[doc = concat!("Write a ", $name, " record from formatted arguments.")]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.emit($severity, args);
        }
    };
}

macro_rules! terminating {
    ($severity:expr, $effect:literal, $plain:ident, $line:ident, $formatted:ident) => {
        #[doc = concat!("Write a record from space-joined arguments, then ", $effect, ".")]
        pub fn $plain(&self, args: &[&dyn fmt::Display]) -> ! {
            self.terminate($severity, join(args))
        }

        #[doc = concat!("Write a record from space-joined arguments as a whole line, then ", $effect, ".")]
        pub fn $line(&self, args: &[&dyn fmt::Display]) -> ! {
            self.terminate($severity, join_line(args))
        }

        #[doc = concat!("Write a record from formatted arguments, then ", $effect, ".")]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) -> ! {
            self.terminate($severity, args.to_string())
        }
    };
}

macro_rules! record {
    ($level:ident, $prefix:expr, $severity:expr, $message:expr) => {
        tracing::$level!(prefix = $prefix, severity = $severity, "{}", $message)
    };
}

impl Logger {
    /// Create a logger writing text to stderr, colored when stderr is a terminal.
    ///
    /// `verbosity` is 0 (info and above), 1 (debug and above) or 2 (trace and
    /// above). Any other value is rejected with [`Error::Config`].
    ///
    /// [`Error::Config`]: crate::Error::Config
    pub fn new(prefix: impl Into<String>, verbosity: u8) -> Result<Self> {
        LoggerBuilder::new(prefix).with_verbosity(verbosity).build()
    }

    /// Create a logger from a loaded configuration.
    pub fn from_config(prefix: impl Into<String>, config: &LogConfig) -> Result<Self> {
        LoggerBuilder::from_config(prefix, config.clone()).build()
    }

    pub(crate) fn from_parts(prefix: String, verbosity: Verbosity, dispatch: Dispatch) -> Self {
        Self {
            prefix: prefix.into(),
            verbosity,
            dispatch,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether a record of `severity` would be written.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.verbosity.allows(severity)
    }

    leveled!(Severity::Trace, "trace", trace, traceln, tracef);
    leveled!(Severity::Debug, "debug", debug, debugln, debugf);
    leveled!(Severity::Info, "info", info, infoln, infof);
    leveled!(Severity::Warn, "warn", warn, warnln, warnf);
    leveled!(Severity::Error, "error", error, errorln, errorf);
    terminating!(Severity::Fatal, "exit with status 1", fatal, fatalln, fatalf);
    terminating!(Severity::Panic, "panic", panic, panicln, panicf);

    fn emit(&self, severity: Severity, message: fmt::Arguments<'_>) {
        let prefix: &str = &self.prefix;
        let label = severity.as_str();
        dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Trace => record!(trace, prefix, label, message),
            Severity::Debug => record!(debug, prefix, label, message),
            Severity::Info => record!(info, prefix, label, message),
            Severity::Warn => record!(warn, prefix, label, message),
            Severity::Error | Severity::Fatal | Severity::Panic => {
                record!(error, prefix, label, message)
            }
        });
    }

    fn terminate(&self, severity: Severity, message: String) -> ! {
        self.emit(severity, format_args!("{message}"));
        if severity == Severity::Panic {
            panic!("{message}");
        }
        std::process::exit(1)
    }
}

fn join(args: &[&dyn fmt::Display]) -> String {
    let mut joined = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(joined, "{arg}");
    }
    joined
}

/// Line variants end the rendered line themselves, so trailing newlines in the
/// arguments are dropped from the message.
fn join_line(args: &[&dyn fmt::Display]) -> String {
    let mut joined = join(args);
    let kept = joined.trim_end_matches('\n').len();
    joined.truncate(kept);
    joined
}
