//! Error types for response normalization

/// Longest excerpt of an offending response kept for diagnostics
const PREVIEW_CHARS: usize = 120;

/// Errors while turning model text into a structured record
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Neither a fenced JSON block nor a brace-delimited span was found
    #[error("invalid response format: no JSON payload in '{preview}'")]
    InvalidResponseFormat {
        /// Leading excerpt of the response
        preview: String,
    },

    /// A payload was found but is not valid JSON
    #[error("malformed JSON payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload parsed but is not a JSON object
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type of the payload
        found: &'static str,
    },
}

impl NormalizeError {
    /// Create a format error carrying an excerpt of the text
    #[must_use]
    pub fn invalid_format(text: &str) -> Self {
        Self::InvalidResponseFormat {
            preview: text.trim().chars().take(PREVIEW_CHARS).collect(),
        }
    }

    /// True when no JSON payload could be located at all
    #[inline]
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidResponseFormat { .. })
    }
}

/// Result type alias for normalization
pub type NormalizeResult<T> = Result<T, NormalizeError>;
