//! Error types for Consentry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown signal: {id}")]
    UnknownSignal { id: String },

    #[error("malformed persisted state: {0}")]
    MalformedState(String),

    #[error("consent context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn unknown_signal(id: impl Into<String>) -> Self {
        Self::UnknownSignal { id: id.into() }
    }

    pub fn malformed_state(reason: impl Into<String>) -> Self {
        Self::MalformedState(reason.into())
    }
}
