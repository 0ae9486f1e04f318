//! Error types for the upload client.

/// Upload errors.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Transport failure before a response arrived.
    #[error("network error: {message}")]
    Network { message: String },

    /// Service answered with an error status and no usable body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Client could not be set up.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
