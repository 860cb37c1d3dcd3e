//! Error types for czrain services.

use thiserror::Error;

/// Result type alias using PrecipError.
pub type PrecipResult<T> = Result<T, PrecipError>;

/// Primary error type for precipitation data operations.
#[derive(Debug, Error)]
pub enum PrecipError {
    // === Request validation errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    // === Data errors ===
    #[error("Data not available for date: {0}")]
    DataNotAvailable(String),

    #[error("Failed to parse source data: {0}")]
    SourceParseError(String),

    #[error("Source reported date {reported} but {requested} was requested")]
    SourceDateMismatch { requested: String, reported: String },

    #[error("Day offset {offset} outside supported window {min}-{max}")]
    OffsetOutOfRange { offset: i64, min: u32, max: u32 },

    // === Storage errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    // === Infrastructure errors ===
    #[error("Source request failed: {0}")]
    SourceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Request timeout")]
    Timeout,
}

impl PrecipError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            PrecipError::MissingParameter(_)
            | PrecipError::InvalidParameter { .. }
            | PrecipError::InvalidDate(_)
            | PrecipError::InvalidRange(_) => 400,

            PrecipError::StationNotFound(_)
            | PrecipError::DataNotAvailable(_)
            | PrecipError::EmptyDataset => 404,

            PrecipError::Timeout => 504,

            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for PrecipError {
    fn from(err: std::io::Error) -> Self {
        PrecipError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for PrecipError {
    fn from(err: serde_json::Error) -> Self {
        PrecipError::InternalError(format!("JSON error: {}", err))
    }
}
