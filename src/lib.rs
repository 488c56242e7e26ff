//! # Prefixlog
//!
//! Leveled console logging where every record carries the name of the
//! logger that produced it.
//!
//! ## Features
//!
//! - One [`Logger`] per component, each tagging its records with a `prefix`
//! - Verbosity 0/1/2 selecting info, debug or trace as the lowest level written
//! - Colored, timestamped text output or JSON
//! - Fatal records exit the process, panic records unwind
//! - Built on the `tracing` ecosystem, without touching the global subscriber
//!
//! ## Example
//!
//! ```rust
//! use prefixlog::Logger;
//!
//! let log = Logger::new("db", 0)?;
//! log.info(&[&"connected to", &"replica-2"]);
//! log.warnf(format_args!("query took {}ms", 812));
//! # Ok::<(), prefixlog::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;

pub use builder::LoggerBuilder;
pub use config::LogConfig;
pub use error::{Error, Result};
pub use format::PrefixedFormatter;
pub use level::{Severity, Verbosity};
pub use logger::Logger;

pub use tracing_subscriber::fmt::MakeWriter;

/// Start building a logger for `prefix`.
pub fn builder(prefix: impl Into<String>) -> LoggerBuilder {
    LoggerBuilder::new(prefix)
}
