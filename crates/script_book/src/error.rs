use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptBookError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script book from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("script book from {origin} has an empty script for command '{command}'")]
    EmptyCommandScript { origin: String, command: String },

    #[error("no script is registered for command '{command}'")]
    MissingCommand { command: String },

    #[error("unknown placeholder '{{{name}}}' in line: {line}")]
    UnknownPlaceholder { name: String, line: String },
}

impl ScriptBookError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }
}
