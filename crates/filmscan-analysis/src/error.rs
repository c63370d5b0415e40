//! Error types for the analysis pipeline.

use filmscan_media::MediaError;
use thiserror::Error;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that abort an analysis run.
///
/// Scoring and selection shortfalls are deliberately *not* here; they
/// degrade gracefully and surface as warnings on the report instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Probing or decoding failed before any scene existed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// The source yielded zero usable samples (empty or zero-length video).
    #[error("no scenes detected: source produced no usable samples")]
    NoScenesDetected,

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The extraction worker pool could not be driven to completion.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}
