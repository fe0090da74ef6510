use std::path::PathBuf;

use script_book::ScriptBookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load scripts: {0}")]
    Scripts(#[from] ScriptBookError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Logger(String),

    #[error("failed to spawn input reader: {0}")]
    InputReader(#[source] std::io::Error),
}
