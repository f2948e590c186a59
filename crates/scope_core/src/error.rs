use thiserror::Error;

/// Failures surfaced by a single submission or probe.
///
/// Every variant is recoverable: the controller turns it into one blocking
/// notification and keeps the UI interactive.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The candidate's bytes could not be read from disk.
    #[error("failed to read file {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}, details: {body}")]
    Transport { status: u16, body: String },
    /// No HTTP response was received at all.
    #[error("network error: {0}")]
    Network(String),
    /// A success status whose body is not the expected JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The service ran but reported `success: false`.
    #[error("{0}")]
    Application(String),
    /// The health probe failed or reported the model as not loaded.
    #[error("Service unavailable. Make sure the inference server is running.")]
    ServiceUnavailable,
    /// The selection is not an image the service accepts.
    #[error("Please choose an image file (JPEG, PNG, TIFF, etc.): {name}")]
    UnsupportedFile { name: String },
    /// The service returned an empty prediction vector.
    #[error("service returned no predictions")]
    EmptyPredictions,
}

impl From<reqwest::Error> for ScopeError {
    fn from(err: reqwest::Error) -> Self {
        ScopeError::Network(err.to_string())
    }
}

pub type Result<T, E = ScopeError> = std::result::Result<T, E>;
