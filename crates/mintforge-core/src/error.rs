//! Error types module
//!
//! Errors above the storage boundary are unified under [`AppError`]. Storage
//! operations have their own error type in the storage crate; upload entry
//! points additionally report failures as data rather than errors.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image generation error: {0}")]
    ImageGeneration(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Wrap an arbitrary error with a contextual message.
    pub fn internal_with_source(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::InternalWithSource {
            message: message.into(),
            source,
        }
    }
}
