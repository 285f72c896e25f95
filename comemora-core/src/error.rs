//! Error types for the comemora ecosystem.

use thiserror::Error;

/// Errors that can occur in comemora operations.
#[derive(Error, Debug)]
pub enum ComemoraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error("Date store error: {0}")]
    DateStore(String),

    #[error("Completion request failed: {0}")]
    LlmRequest(String),

    #[error("Completion service returned no usable response after {attempts} attempts: {reason}")]
    LlmResponse { attempts: u32, reason: String },

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for comemora operations.
pub type ComemoraResult<T> = Result<T, ComemoraError>;
