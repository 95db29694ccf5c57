use thiserror::Error;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is the backend's
    /// own `message`/`error` field when it sent one.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A record id that cannot name a single path segment; nothing was sent.
    #[error("invalid record id \"{0}\"")]
    InvalidId(String),

    /// A request body field could not be encoded; nothing was sent.
    #[error("JSON serialization error for {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A property draft failed client-side validation; nothing was sent.
    #[error("invalid property draft: {0}")]
    InvalidDraft(String),

    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// `true` when the backend rejected the request as unauthenticated.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}
