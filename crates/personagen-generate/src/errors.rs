use thiserror::Error;

/// Errors surfaced by batch generation and export.
///
/// The composition core itself never fails; unmet preconditions fall back
/// to simpler valid output. Errors here are I/O and serialization only.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}
