pub mod config;
pub mod core;
pub mod parse;
pub mod reader;
pub mod report;
pub mod show_cmd;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunInfoError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{marker}' line has no {expected}: {line}")]
    MissingPattern {
        marker: &'static str,
        expected: &'static str,
        line: String,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

pub type RunInfoResult<T> = Result<T, RunInfoError>;

impl RunInfoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunInfoError::Io { path: path.into(), source }
    }
}
