// src/error.rs - Failure taxonomy for a single analysis request
use thiserror::Error;

/// Terminal failure of an analysis request.
///
/// A frame without a detected subject is *not* an error; detectors report
/// that as `Ok(None)`. Every variant here aborts the whole request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("video decode failed: {0}")]
    Decode(String),

    #[error("video encode failed: {0}")]
    Encode(String),

    #[error("pose detector fault: {0}")]
    Detector(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid landmark set: expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
