//! Gemini `generateContent` client

use crate::error::ModelError;
use crate::model::{GenerationRequest, GenerativeModel};
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default multimodal model
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; never logged
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model name, e.g. `gemini-flash-latest`
    pub model: String,
    /// Scheme and host, without a trailing path
    pub base_url: String,
    /// Per-call HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature; service default when absent
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    /// Create configuration for the given key
    #[inline]
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// With model name
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With HTTP timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// With sampling temperature
    #[inline]
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            temperature: None,
        }
    }
}

/// HTTP client for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client
    ///
    /// # Errors
    /// [`ModelError::Config`] when the key or model is empty, transport error
    /// when the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        if config.api_key.trim().is_empty() {
            return Err(ModelError::Config("missing API key".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(ModelError::Config("missing model name".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        let has_image = request.image.is_some();
        let body = GenerateContentRequest::from_request(request, self.config.temperature);
        let started = Instant::now();

        let response = self
            .http
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(
            model = %self.config.model,
            status = status.as_u16(),
            has_image,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "generateContent returned"
        );

        if !status.is_success() {
            let err = ModelError::status(status.as_u16(), &text);
            if err.is_quota() {
                tracing::warn!(model = %self.config.model, "generateContent quota exhausted");
            }
            return Err(err);
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| ModelError::Decode(e.to_string()))?;

        parsed.text().ok_or_else(|| ModelError::EmptyResponse {
            reason: parsed.empty_reason(),
        })
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
