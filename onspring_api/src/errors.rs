//! Error types for the API client.

/// A non-success response from the Onspring API.
///
/// `message` is taken from the `{"message": "..."}` error body when the API
/// sends a non-empty one. A body that is missing, not JSON, lacks `message`
/// or carries an empty `message` yields the standard reason phrase for the
/// status code instead (empty for codes without one).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("onspring api error: status={status_code} message={message}")]
pub struct ApiError {
    /// HTTP status code returned by the API.
    pub status_code: u16,
    /// Error message from the response body or the status reason phrase.
    pub message: String,
}

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The call was made without a context.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// The request could not be built (malformed URL, header or paging values).
    #[error("Failed to create request: {0}")]
    RequestConstruction(String),
    /// The transport failed before a response was received.
    #[error("Transport failure")]
    Transport(#[from] reqwest::Error),
    /// The caller's context was cancelled before the response arrived.
    #[error("Request cancelled")]
    Cancelled,
    /// The caller's context deadline passed before the response arrived.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
    /// The API answered with a status outside 200-299.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The API answered with success but the body could not be decoded.
    #[error("Failed to decode response body")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that happened while the request was on the wire:
    /// transport errors, cancellation and deadline expiry.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Cancelled | Error::DeadlineExceeded
        )
    }

    /// Status code of the remote error, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status_code),
            _ => None,
        }
    }
}
