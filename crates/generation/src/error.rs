/// Errors from the text-generation layer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No API key is configured; every AI-backed operation fails.
    #[error("Generation service API key is not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generation service error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The completion did not contain the expected content.
    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),
}
