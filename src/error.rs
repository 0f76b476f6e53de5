//! Error type shared by the solvers and the point loaders.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("exhaustive search refused {points} points (limit is {limit})")]
    TooManyPoints { points: usize, limit: usize },
    #[error("unsupported point file: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
