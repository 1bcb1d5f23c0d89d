//! Error types for Canopy.

use thiserror::Error;

/// Result type alias for Canopy operations.
pub type Result<T> = std::result::Result<T, CanopyError>;

/// Errors that can occur in Canopy operations.
#[derive(Error, Debug)]
pub enum CanopyError {
    /// Malformed build input (empty completion set, score length mismatch).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The decode capability could not resolve a token id.
    #[error("failed to decode token id {token_id}")]
    DecodeFailure {
        /// Token id the decoder did not recognize.
        token_id: u32,
    },

    /// The external graph layout engine is missing or misconfigured.
    #[error("layout engine unavailable: {0}")]
    RenderEngineUnavailable(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
