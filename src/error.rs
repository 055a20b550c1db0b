use thiserror::Error;

/// Every way a search can fail. An empty result set is not in here:
/// see [`crate::client::SearchOutcome::Empty`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The filter was rejected before any request was built.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A raw result item lacks a required field or has the wrong shape.
    #[error("malformed item: {0}")]
    MalformedItem(String),

    /// No API key is configured. Nothing was sent.
    #[error("API key is not configured")]
    MissingCredential,

    /// The search endpoint could not be reached, answered with an error,
    /// or returned a body that could not be decoded.
    #[error("search request failed: {0}")]
    RequestFailure(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
