//! UX Lens analysis pipeline
//!
//! Turns a screenshot into a stored [`Analysis`](uxlens_model::Analysis)
//! with two sequential model calls:
//!
//! ```text
//! data URL → ImageData → analyze_ui_elements → predict_user_behavior → combine → store
//!                          (image + prompt)      (inventory JSON)
//! ```
//!
//! Model output always passes through `uxlens-normalize` before it is used.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uxlens_core::prelude::*;
//!
//! let config = AppConfig::from_toml_file("uxlens.toml")?;
//! let model = Arc::new(GeminiClient::new(config.gemini.clone())?);
//! let pipeline = AnalysisPipeline::new(model, config.store.open()?, config.pipeline);
//!
//! let analysis = pipeline
//!     .analyze(AnalyzeRequest::new(data_url, "landing.png"))
//!     .await?;
//! println!("{}: {:?}", analysis.id, analysis.metrics.funnel);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod combine;
pub mod config;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod prompts;
pub mod stages;

pub use config::{AppConfig, PipelineConfig, ServerConfig, StoreBackend};
pub use error::{ConfigError, ImageError, LookupError, PipelineError, PipelineResult, Stage};
pub use image::ImageData;
pub use pipeline::{AnalysisPipeline, AnalyzeRequest};
pub use stages::{analyze_ui_elements, predict_user_behavior};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AnalysisPipeline, AnalyzeRequest, AppConfig, LookupError, PipelineConfig, PipelineError,
        StoreBackend,
    };
    pub use uxlens_gemini::{GeminiClient, GeminiConfig, GenerativeModel};
    pub use uxlens_store::AnalysisStore;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
