//! Error types for generative model calls

/// Longest response body excerpt kept in a status error
const BODY_EXCERPT_CHARS: usize = 300;

/// Generative model call failures
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Network or TLS failure, including client-side timeouts
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("model service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },

    /// The response carried no candidate text
    #[error("model returned no text (reason: {reason})")]
    EmptyResponse {
        /// Block or finish reason reported by the service, `unspecified` if none
        reason: String,
    },

    /// The response body could not be decoded
    #[error("undecodable model response: {0}")]
    Decode(String),

    /// Client misconfiguration (missing key, bad base URL)
    #[error("configuration error: {0}")]
    Config(String),
}

impl ModelError {
    /// Build a status error, truncating the body
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }

    /// Quota or rate limiting reported by the service
    #[inline]
    #[must_use]
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::Status { status: 429, .. })
    }
}
