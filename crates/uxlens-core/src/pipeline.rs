//! Analysis orchestrator
//!
//! One run is strictly ordered: validate the image, extract elements,
//! predict behavior, combine, persist. Runs are independent of each other and
//! may execute concurrently.

use crate::combine::combine;
use crate::config::PipelineConfig;
use crate::error::{LookupError, PipelineError, PipelineResult};
use crate::image::ImageData;
use crate::stages::{analyze_ui_elements, predict_user_behavior};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uxlens_gemini::GenerativeModel;
use uxlens_model::raw::RawAnalysisDraft;
use uxlens_model::{Analysis, AnalysisId};
use uxlens_normalize::normalize_draft;
use uxlens_store::{AnalysisStore, StoreResult};

/// Request to analyze one screenshot
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Image as a base64 data URL
    pub image: String,
    /// Client-supplied file name
    pub file_name: String,
}

impl AnalyzeRequest {
    /// Create request
    #[inline]
    #[must_use]
    pub fn new(image: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            file_name: file_name.into(),
        }
    }
}

/// Runs analyses and serves stored ones
#[derive(Clone)]
pub struct AnalysisPipeline {
    model: Arc<dyn GenerativeModel>,
    store: Arc<dyn AnalysisStore>,
    config: PipelineConfig,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("model", &self.model.name())
            .field("store", &self.store.backend())
            .field("config", &self.config)
            .finish()
    }
}

impl AnalysisPipeline {
    /// Create pipeline
    #[must_use]
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        store: Arc<dyn AnalysisStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            model,
            store,
            config,
        }
    }

    /// Active limits
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn AnalysisStore> {
        &self.store
    }

    /// Analyze a screenshot and persist the result
    ///
    /// # Errors
    /// [`PipelineError`] naming the failed stage, or
    /// [`PipelineError::Timeout`] when the run exceeds its deadline. Nothing
    /// is stored on failure.
    pub async fn analyze(&self, request: AnalyzeRequest) -> PipelineResult<Analysis> {
        let deadline = Duration::from_secs(self.config.timeout_secs);
        let started = Instant::now();
        tracing::info!(file_name = %request.file_name, model = self.model.name(), "analysis started");

        let outcome = match tokio::time::timeout(deadline, self.run(request)).await {
            Ok(result) => result,
            Err(_) => Err(PipelineError::Timeout {
                duration_secs: self.config.timeout_secs,
            }),
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &outcome {
            Ok(analysis) => tracing::info!(id = %analysis.id, elapsed_ms, "analysis stored"),
            Err(e) if e.is_client_error() => {
                tracing::warn!(error = %e, "analysis request rejected");
            }
            Err(e) => tracing::error!(
                error = %e,
                stage = e.stage().map_or("timeout", |s| s.as_str()),
                elapsed_ms,
                "analysis failed"
            ),
        }
        outcome
    }

    async fn run(&self, request: AnalyzeRequest) -> PipelineResult<Analysis> {
        let image = ImageData::from_data_url(&request.image, self.config.max_image_bytes)?;

        let inventory = analyze_ui_elements(self.model.as_ref(), &image).await?;
        let report = predict_user_behavior(self.model.as_ref(), &inventory).await?;
        let record = combine(&request.file_name, &request.image, &inventory, report);

        Ok(self.store.insert(record).await?)
    }

    /// Load a stored analysis by its textual id
    ///
    /// # Errors
    /// [`LookupError::InvalidId`] for malformed ids,
    /// [`LookupError::NotFound`] for unknown ones.
    pub async fn fetch(&self, id: &str) -> Result<Analysis, LookupError> {
        let parsed: AnalysisId = id.parse()?;
        self.store
            .get(&parsed)
            .await?
            .ok_or_else(|| LookupError::NotFound(parsed.to_string()))
    }

    /// Normalize and persist an externally produced analysis
    ///
    /// # Errors
    /// Store failures.
    pub async fn import(&self, draft: RawAnalysisDraft) -> StoreResult<Analysis> {
        let record = normalize_draft(draft);
        let analysis = self.store.insert(record).await?;
        tracing::info!(id = %analysis.id, file_name = %analysis.file_name, "analysis imported");
        Ok(analysis)
    }

    /// Number of stored analyses
    ///
    /// # Errors
    /// Store failures.
    pub async fn count(&self) -> StoreResult<usize> {
        self.store.count().await
    }
}
