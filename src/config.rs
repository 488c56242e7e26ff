use serde::{Deserialize, Serialize};

use crate::{Error, Result, Verbosity};

/// Configuration for a prefixed logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Verbosity: 0 (info), 1 (debug) or 2 (trace)
    #[serde(default)]
    pub verbosity: u8,
    /// Log format ("text" or "json")
    #[serde(default = "default_format")]
    pub format: String,
    /// Color the text format
    #[serde(default = "default_color")]
    pub color: bool,
    /// Console stream ("stderr" or "stdout")
    #[serde(default = "default_output")]
    pub output: String,
    /// Write to this file instead of the console
    #[serde(default)]
    pub file: Option<std::path::PathBuf>,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            verbosity: 0,
            format: default_format(),
            color: default_color(),
            output: default_output(),
            file: None,
        }
    }

    /// Set verbosity
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: String) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set console stream
    pub fn with_output(mut self, output: String) -> Self {
        self.output = output;
        self
    }

    /// Write records to a file
    pub fn with_file<P: Into<std::path::PathBuf>>(mut self, path: P) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Check every field, returning the parsed verbosity.
    pub fn validate(&self) -> Result<Verbosity> {
        let verbosity = Verbosity::try_from(self.verbosity)?;
        self.log_format()?;
        self.output_stream()?;
        Ok(verbosity)
    }

    pub(crate) fn log_format(&self) -> Result<LogFormat> {
        match self.format.as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Config(format!("unknown log format: {other}"))),
        }
    }

    pub(crate) fn output_stream(&self) -> Result<OutputStream> {
        match self.output.as_str() {
            "stderr" => Ok(OutputStream::Stderr),
            "stdout" => Ok(OutputStream::Stdout),
            other => Err(Error::Config(format!("unknown output stream: {other}"))),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputStream {
    Stderr,
    Stdout,
}

fn default_format() -> String {
    "text".to_string()
}

fn default_color() -> bool {
    true
}

fn default_output() -> String {
    "stderr".to_string()
}
