//! Builder pattern for constructing a prefixed logger.
//!
//! # Example
//!
//! ```rust
//! // Debug output to stdout, no colors
//! let log = prefixlog::builder("worker")
//!     .with_verbosity(1)
//!     .with_output("stdout")
//!     .with_color(false)
//!     .build()
//!     .expect("Failed to build logger");
//!
//! log.debug(&[&"picked up job", &17]);
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LogFormat, OutputStream};
use crate::{Error, LogConfig, Logger, PrefixedFormatter, Result};

/// A builder for configuring and constructing a [`Logger`].
pub struct LoggerBuilder {
    prefix: String,
    config: LogConfig,
    writer: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    /// Create a LoggerBuilder with default configuration.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::from_config(prefix, LogConfig::new())
    }

    /// Create a LoggerBuilder from an existing configuration.
    pub fn from_config(prefix: impl Into<String>, config: LogConfig) -> Self {
        Self {
            prefix: prefix.into(),
            config,
            writer: None,
        }
    }

    /// Set verbosity (0, 1 or 2).
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.config = self.config.with_verbosity(verbosity);
        self
    }

    /// Set the output format ("text" or "json").
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.config = self.config.with_format(format.into());
        self
    }

    /// Enable or disable colors in the text format.
    pub fn with_color(mut self, color: bool) -> Self {
        self.config = self.config.with_color(color);
        self
    }

    /// Set the console stream ("stderr" or "stdout").
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.config = self.config.with_output(output.into());
        self
    }

    /// Write records to a file instead of the console.
    ///
    /// Needs the `file` feature; without it [`build`](Self::build) fails.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_file(path);
        self
    }

    /// Write records to a custom destination.
    ///
    /// Takes precedence over the file and console settings. Colors are used
    /// exactly when [`with_color`](Self::with_color) asks for them.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// The configuration collected so far.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Validate the configuration and construct the logger.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The verbosity, format or output stream is unknown
    /// - The log file cannot be opened
    pub fn build(self) -> Result<Logger> {
        let verbosity = self.config.validate()?;
        let format = self.config.log_format()?;

        let (writer, color) = match self.writer {
            Some(writer) => (writer, self.config.color),
            None => match &self.config.file {
                Some(path) => (file_writer(path)?, false),
                None => {
                    let stream = self.config.output_stream()?;
                    (console_writer(stream), console_color(stream, self.config.color))
                }
            },
        };

        let filter = EnvFilter::default().add_directive(verbosity.level_filter().into());

        let subscriber = tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false);

        let dispatch = match format {
            LogFormat::Text => Dispatch::new(
                subscriber
                    .event_format(PrefixedFormatter::new().with_color(color))
                    .finish(),
            ),
            LogFormat::Json => Dispatch::new(subscriber.json().flatten_event(true).finish()),
        };

        Ok(Logger::from_parts(self.prefix, verbosity, dispatch))
    }
}

fn console_writer(stream: OutputStream) -> BoxMakeWriter {
    match stream {
        OutputStream::Stderr => BoxMakeWriter::new(std::io::stderr),
        OutputStream::Stdout => BoxMakeWriter::new(std::io::stdout),
    }
}

/// Colors on a console stream only when asked for and the stream is a terminal.
fn console_color(stream: OutputStream, requested: bool) -> bool {
    requested
        && match stream {
            OutputStream::Stderr => std::io::stderr().is_terminal(),
            OutputStream::Stdout => std::io::stdout().is_terminal(),
        }
}

#[cfg(feature = "file")]
fn file_writer(path: &std::path::Path) -> Result<BoxMakeWriter> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Config(format!("not a file path: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(BoxMakeWriter::new(appender))
}

#[cfg(not(feature = "file"))]
fn file_writer(path: &std::path::Path) -> Result<BoxMakeWriter> {
    Err(Error::Config(format!(
        "file output to {} requires the `file` feature",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verbosity;

    #[test]
    fn test_builder_new() {
        let builder = LoggerBuilder::new("api");
        assert_eq!(builder.config(), &LogConfig::new());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = LoggerBuilder::new("api")
            .with_verbosity(2)
            .with_format("json")
            .with_color(false)
            .with_output("stdout")
            .with_file("api.log");

        let config = builder.config();
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.format, "json");
        assert!(!config.color);
        assert_eq!(config.output, "stdout");
        assert_eq!(config.file, Some(PathBuf::from("api.log")));
    }

    #[test]
    fn test_builder_from_config() {
        let original = LogConfig::new().with_verbosity(1);
        let log = LoggerBuilder::from_config("api", original).build().unwrap();
        assert_eq!(log.prefix(), "api");
        assert_eq!(log.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn test_build_rejects_unknown_format() {
        let result = LoggerBuilder::new("api").with_format("xml").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_build_rejects_unknown_verbosity() {
        let result = LoggerBuilder::new("api").with_verbosity(9).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_build_json_to_stdout() {
        let log = LoggerBuilder::new("api")
            .with_format("json")
            .with_output("stdout")
            .build();
        assert!(log.is_ok());
    }

    #[test]
    fn test_console_color_follows_stream() {
        assert!(!console_color(OutputStream::Stderr, false));
        assert!(!console_color(OutputStream::Stdout, false));
        assert_eq!(
            console_color(OutputStream::Stderr, true),
            std::io::stderr().is_terminal()
        );
        assert_eq!(
            console_color(OutputStream::Stdout, true),
            std::io::stdout().is_terminal()
        );
    }

    #[cfg(not(feature = "file"))]
    #[test]
    fn test_file_output_needs_feature() {
        let result = LoggerBuilder::new("api").with_file("api.log").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
