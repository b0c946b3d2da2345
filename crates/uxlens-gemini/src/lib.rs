//! UX Lens generative model backend
//!
//! A small, switchable seam between the analysis pipeline and whatever
//! produces text from prompts:
//!
//! - [`GenerativeModel`]: object-safe async trait the pipeline depends on
//! - [`GeminiClient`]: implementation over the Gemini `generateContent` API
//!
//! # Example
//!
//! ```rust,ignore
//! use uxlens_gemini::{GeminiClient, GeminiConfig, GenerationRequest, GenerativeModel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new(std::env::var("GEMINI_API_KEY")?))?;
//! let text = client.generate(GenerationRequest::text("Say hello as JSON")).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod client;
mod error;
mod model;
mod wire;

pub use client::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::ModelError;
pub use model::{GenerationRequest, GenerativeModel, InlineImage};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
