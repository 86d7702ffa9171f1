use thiserror::Error;

/// Errors for core model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value violates a model-level bound (probability outside [0,1], etc).
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
