/// Errors raised by the API client and store.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, decoding).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned an error response.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// An operation needing a token was attempted before login.
    #[error("not authenticated")]
    NotAuthenticated,
}
