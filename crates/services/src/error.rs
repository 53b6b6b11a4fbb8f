//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by answer-details reporters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportingError {
    #[error("answer details reporting is not configured")]
    Disabled,
    #[error("answer details endpoint returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("invalid answer details endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("answer details recorder failed: {0}")]
    Recorder(String),
}

/// Errors emitted while starting an `AnswerDetailsFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error("answer details flow needs a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
