//! Error types for the analysis pipeline
//!
//! Every failure is terminal for the request that raised it; nothing partial
//! is persisted.

use std::path::PathBuf;
use uxlens_gemini::ModelError;
use uxlens_model::IdError;
use uxlens_normalize::NormalizeError;
use uxlens_store::StoreError;

/// Pipeline stage, for logs and error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Request validation
    Input,
    /// Element extraction
    Elements,
    /// Behavior prediction
    Behavior,
    /// Persistence
    Persist,
}

impl Stage {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Elements => "elements",
            Self::Behavior => "behavior",
            Self::Persist => "persist",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected image input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// Not of the form `data:<mime>;base64,<payload>`
    #[error("image must be a base64 data URL")]
    NotADataUrl,

    /// Media type is not `image/*`
    #[error("unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    /// Nothing after the comma
    #[error("image payload is empty")]
    EmptyPayload,

    /// Payload contains characters outside the base64 alphabet
    #[error("image payload is not valid base64")]
    InvalidBase64,

    /// Decoded size over the configured limit
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Estimated decoded size
        size: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Failure of one analysis run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input image rejected before any model call
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageError),

    /// Model call failed
    #[error("{stage} model call failed: {source}")]
    Model {
        /// Stage that made the call
        stage: Stage,
        /// Underlying error
        #[source]
        source: ModelError,
    },

    /// Model output could not be normalized
    #[error("{stage} response rejected: {source}")]
    Normalize {
        /// Stage whose output was rejected
        stage: Stage,
        /// Underlying error
        #[source]
        source: NormalizeError,
    },

    /// Record could not be persisted
    #[error("failed to store analysis: {0}")]
    Store(#[from] StoreError),

    /// Whole run exceeded its deadline
    #[error("analysis timed out after {duration_secs}s")]
    Timeout {
        /// Configured limit
        duration_secs: u64,
    },
}

impl PipelineError {
    /// Create model error for a stage
    pub fn model(stage: Stage, source: ModelError) -> Self {
        Self::Model { stage, source }
    }

    /// Create normalize error for a stage
    pub fn normalize(stage: Stage, source: impl Into<NormalizeError>) -> Self {
        Self::Normalize {
            stage,
            source: source.into(),
        }
    }

    /// Stage that failed; `None` for a timeout, which spans the whole run
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::InvalidImage(_) => Some(Stage::Input),
            Self::Model { stage, .. } | Self::Normalize { stage, .. } => Some(*stage),
            Self::Store(_) => Some(Stage::Persist),
            Self::Timeout { .. } => None,
        }
    }

    /// Check if the caller sent bad input
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidImage(_))
    }
}

/// Failure to fetch a stored analysis
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Identifier is malformed
    #[error(transparent)]
    InvalidId(#[from] IdError),

    /// No record under this identifier
    #[error("analysis {0} not found")]
    NotFound(String),

    /// Store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File unreadable
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Pipeline result type
pub type PipelineResult<T> = Result<T, PipelineError>;
