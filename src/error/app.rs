use thiserror::Error;

use super::{ConfigError, HttpError, ReportError, ValidationError};

/// Everything that stops `flooder` with exit status 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("Invalid arguments: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Background task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

pub type AppResult<T> = Result<T, AppError>;
