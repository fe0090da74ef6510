//! Tracing setup.
//!
//! Log lines never go to stdout, which carries the transcript. They go to the
//! file named by `DBC_TERMINAL_LOG`, or to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;
use crate::error::SessionError;

const DEFAULT_LEVEL: &str = "warn";

pub fn log_filter(level: Option<&str>) -> EnvFilter {
    let level = match level {
        Some("silent") => "off",
        Some("fatal") => "error",
        Some(other) => other,
        None => DEFAULT_LEVEL,
    };

    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

pub fn init(config: &EnvConfig) -> Result<(), SessionError> {
    let filter = log_filter(config.log_level.as_deref());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| SessionError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|error| SessionError::Logger(error.to_string()))
}
