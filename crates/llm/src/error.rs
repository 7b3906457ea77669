/// Errors raised by the LLM service.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The external provider call failed (network, HTTP status, or an
    /// unparseable response body). Not retried.
    #[error("LLM provider error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Upstream(err.to_string())
    }
}
