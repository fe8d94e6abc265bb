//! Domain errors for the greenloop repair loop.

use thiserror::Error;

/// Domain-level errors that can occur while driving a repair run.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Generator unavailable: {0}")]
    GeneratorUnavailable(String),

    #[error("Generator returned an unusable response: {0}")]
    GeneratorResponseInvalid(String),

    #[error("Build tool could not be invoked: {0}")]
    BuildToolUnavailable(String),

    #[error("Manifest could not be parsed: {0}")]
    ManifestUnparsable(String),

    #[error("Invalid generation target: {0}")]
    InvalidTarget(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type DomainResult<T> = Result<T, DomainError>;
