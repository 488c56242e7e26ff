//! Example of loading logger configuration from a TOML file.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;
use std::fs;

#[derive(Deserialize)]
struct Config {
    log: prefixlog::LogConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = "demos/config.toml";
    let config_content = fs::read_to_string(config_path)
        .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));

    let root: Config = toml::from_str(&config_content)?;
    let log = prefixlog::Logger::from_config("config", &root.log)?;

    log.trace(&[&"This is a trace message (not visible at verbosity 1)"]);
    log.debug(&[&"This is a debug message"]);
    log.infof(format_args!("Loaded configuration from {}", config_path));
    log.warn(&[&"This is a warning message"]);
    log.error(&[&"This is an error message"]);

    Ok(())
}
