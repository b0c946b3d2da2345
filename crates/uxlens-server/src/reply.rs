//! Response bodies and error mapping
//!
//! Error bodies carry a fixed message per failure class. Details go to the
//! log, never to the client.

use serde::Serialize;
use uxlens_core::{LookupError, PipelineError};
use uxlens_model::{Analysis, ElementBreakdown, Hotspot, Insight, Metrics};
use warp::http::StatusCode;
use warp::reply::{json, with_status, Json, WithStatus};

/// `{ "success": false, "error": "..." }`
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) success: bool,
    pub(crate) error: String,
}

/// Result of `POST /api/analyze-ui`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse<'a> {
    pub(crate) success: bool,
    pub(crate) id: String,
    pub(crate) metrics: &'a Metrics,
    pub(crate) hotspots: &'a [Hotspot],
    pub(crate) insights: &'a [Insight],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) element_breakdown: Option<&'a ElementBreakdown>,
    pub(crate) strengths: &'a [String],
    pub(crate) drop_off_points: &'a [String],
}

impl<'a> AnalyzeResponse<'a> {
    pub(crate) fn new(analysis: &'a Analysis) -> Self {
        Self {
            success: true,
            id: analysis.id.to_string(),
            metrics: &analysis.metrics,
            hotspots: &analysis.hotspots,
            insights: &analysis.insights,
            user_path: analysis.user_path.as_deref(),
            element_breakdown: analysis.element_breakdown.as_ref(),
            strengths: &analysis.strengths,
            drop_off_points: &analysis.drop_off_points,
        }
    }
}

/// Result of `GET /api/analysis/{id}`
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisEnvelope<'a> {
    pub(crate) success: bool,
    pub(crate) data: &'a Analysis,
}

/// Result of `POST /api/save-analysis`: the stored record inline
#[derive(Debug, Serialize)]
pub(crate) struct SavedResponse<'a> {
    pub(crate) success: bool,
    #[serde(flatten)]
    pub(crate) record: &'a Analysis,
}

/// Result of `GET /health`
#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) analyses: Option<usize>,
}

pub(crate) type JsonReply = WithStatus<Json>;

/// Serialize `body` with `status`
pub(crate) fn reply<T: Serialize>(body: &T, status: StatusCode) -> JsonReply {
    with_status(json(body), status)
}

/// Error reply with a generic message
pub(crate) fn error_reply(message: &str, status: StatusCode) -> JsonReply {
    reply(
        &ErrorBody {
            success: false,
            error: message.to_string(),
        },
        status,
    )
}

/// HTTP status and client-facing message for a failed analysis
pub(crate) fn pipeline_failure(err: &PipelineError) -> (StatusCode, &'static str) {
    match err {
        PipelineError::InvalidImage(_) => (StatusCode::BAD_REQUEST, "Invalid image"),
        PipelineError::Model { .. } | PipelineError::Normalize { .. } => {
            (StatusCode::BAD_GATEWAY, "Failed to analyze UI")
        }
        PipelineError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "Analysis timed out"),
        PipelineError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save analysis"),
    }
}

/// HTTP status and client-facing message for a failed lookup
pub(crate) fn lookup_failure(err: &LookupError) -> (StatusCode, &'static str) {
    match err {
        LookupError::InvalidId(_) => (StatusCode::BAD_REQUEST, "Invalid analysis ID"),
        LookupError::NotFound(_) => (StatusCode::NOT_FOUND, "Analysis not found"),
        LookupError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch analysis"),
    }
}
