//! UX Lens HTTP API
//!
//! | Method | Path                  | Body                      |
//! |--------|-----------------------|---------------------------|
//! | POST   | `/api/analyze-ui`     | `{ image, fileName }`     |
//! | GET    | `/api/analysis/{id}`  |                           |
//! | POST   | `/api/save-analysis`  | analysis draft            |
//! | GET    | `/health`             |                           |
//!
//! Every response is JSON. Failures use `{ "success": false, "error" }`
//! with a status that reflects the failure class.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod handlers;
mod reply;

use std::convert::Infallible;
use uxlens_core::AnalysisPipeline;
use warp::{Filter, Reply};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: AnalysisPipeline,
    max_body_bytes: u64,
}

impl AppState {
    /// Create state
    #[must_use]
    pub fn new(pipeline: AnalysisPipeline, max_body_bytes: u64) -> Self {
        Self {
            pipeline,
            max_body_bytes,
        }
    }

    /// Analysis pipeline
    #[inline]
    #[must_use]
    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// All API routes with JSON rejection handling
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let limit = state.max_body_bytes;

    let analyze = warp::path!("api" / "analyze-ui")
        .and(warp::post())
        .and(warp::body::content_length_limit(limit))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::analyze);

    let fetch = warp::path!("api" / "analysis" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::fetch);

    let save = warp::path!("api" / "save-analysis")
        .and(warp::post())
        .and(warp::body::content_length_limit(limit))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handlers::save);

    let health = warp::path!("health")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::health);

    analyze
        .or(fetch)
        .or(save)
        .or(health)
        .recover(handlers::rejection)
        .with(warp::trace::request())
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
