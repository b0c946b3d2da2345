//! Backend-agnostic generative model interface

use crate::error::ModelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Image passed inline with a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type such as `image/png`
    pub mime_type: String,
    /// Base64 payload without the data-URL prefix
    pub data: String,
}

impl InlineImage {
    /// Create inline image
    #[inline]
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A single text generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Instruction text
    pub prompt: String,
    /// Optional image the prompt refers to
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    /// Text-only request
    #[inline]
    #[must_use]
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Attach an image
    #[inline]
    #[must_use]
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// A text producer backed by a generative model
///
/// Output is untrusted free text; callers normalize it.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one generation and return the concatenated response text
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError>;

    /// Model name for logs
    fn name(&self) -> &str;
}
