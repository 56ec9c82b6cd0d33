/// Result alias that carries the custom [`PracticeError`] type.
pub type Result<T> = std::result::Result<T, PracticeError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum PracticeError {
    /// A caller violated a precondition, such as handing the WAV encoder
    /// channels of different lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON interchange errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The speech service could not be reached or the transfer failed.
    #[error("speech service request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The speech service answered with a non-success status.
    #[error("speech service returned status {status}")]
    ServiceStatus {
        /// HTTP status code of the failed response.
        status: u16,
    },
}

impl PracticeError {
    /// Creates a [`PracticeError::InvalidArgument`] from the provided message.
    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
