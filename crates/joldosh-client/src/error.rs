use joldosh_shared::ValidationError;
use joldosh_store::StoreError;
use thiserror::Error;

/// Errors from the HTTP adapter and endpoint wrappers.
///
/// Every variant except [`ApiError::Unauthorized`] is returned to the caller
/// for local handling; a 401 additionally tears down the session before the
/// error is reported.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS or protocol failure before a status was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401; the session has already been cleared.
    #[error("Session expired or invalid")]
    Unauthorized,

    /// A 4xx business rejection.  `detail` carries the backend's message
    /// verbatim so the UI can surface it unchanged.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// A 5xx response.
    #[error("Server error ({0})")]
    Server(u16),

    /// The response had a success status but not the promised shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Durable storage failed while reacting to a response.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from session store operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The access token was empty or a serializer artifact
    /// (literal `"undefined"` / `"null"`); nothing was persisted.
    #[error("Auth response does not contain a usable access token")]
    InvalidAccessToken,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Typed outcome of an auth flow operation, per the error taxonomy:
/// validation failures never reach the network, business rejections carry
/// the backend message verbatim, everything else collapses into a generic
/// unexpected failure.  The flow's state is preserved on every error so the
/// user can correct and retry.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Client-side format failure, caught before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend 4xx with its `detail` message, verbatim.
    #[error("{0}")]
    Business(String),

    /// Network, server or storage failure; not automatically retried.
    #[error("Request failed: {0}")]
    Unexpected(String),

    /// A previous submission is still in flight.
    #[error("Another request is already in flight")]
    Busy,

    /// The operation does not apply to the flow's current step.
    #[error("Action not available in the current step")]
    WrongStep,
}

impl From<ApiError> for FlowError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { detail, .. } => Self::Business(detail),
            ApiError::Unauthorized => Self::Business("Authentication failed".to_string()),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

impl From<SessionError> for FlowError {
    fn from(err: SessionError) -> Self {
        Self::Unexpected(err.to_string())
    }
}
