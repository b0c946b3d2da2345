//! Route handlers

use crate::reply::{
    error_reply, lookup_failure, pipeline_failure, reply, AnalysisEnvelope, AnalyzeResponse,
    HealthResponse, JsonReply, SavedResponse,
};
use crate::AppState;
use serde::Deserialize;
use serde_json::Value;
use std::convert::Infallible;
use uxlens_core::AnalyzeRequest;
use uxlens_model::raw::RawAnalysisDraft;
use warp::http::StatusCode;

/// Body of `POST /api/analyze-ui`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeBody {
    image: String,
    #[serde(default)]
    file_name: String,
}

pub(crate) async fn analyze(body: AnalyzeBody, state: AppState) -> Result<JsonReply, Infallible> {
    let request = AnalyzeRequest::new(body.image, body.file_name);
    Ok(match state.pipeline.analyze(request).await {
        Ok(analysis) => reply(&AnalyzeResponse::new(&analysis), StatusCode::OK),
        Err(e) => {
            let (status, message) = pipeline_failure(&e);
            error_reply(message, status)
        }
    })
}

pub(crate) async fn fetch(id: String, state: AppState) -> Result<JsonReply, Infallible> {
    Ok(match state.pipeline.fetch(&id).await {
        Ok(analysis) => reply(
            &AnalysisEnvelope {
                success: true,
                data: &analysis,
            },
            StatusCode::OK,
        ),
        Err(e) => {
            let (status, message) = lookup_failure(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, %id, "analysis lookup failed");
            } else {
                tracing::debug!(error = %e, %id, "analysis lookup rejected");
            }
            error_reply(message, status)
        }
    })
}

pub(crate) async fn save(body: Value, state: AppState) -> Result<JsonReply, Infallible> {
    let draft: RawAnalysisDraft = match serde_json::from_value(body) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(error = %e, "analysis draft rejected");
            return Ok(error_reply("Invalid analysis", StatusCode::BAD_REQUEST));
        }
    };

    Ok(match state.pipeline.import(draft).await {
        Ok(record) => reply(
            &SavedResponse {
                success: true,
                record: &record,
            },
            StatusCode::OK,
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to save analysis");
            error_reply("Failed to save analysis", StatusCode::INTERNAL_SERVER_ERROR)
        }
    })
}

pub(crate) async fn health(state: AppState) -> Result<JsonReply, Infallible> {
    Ok(match state.pipeline.count().await {
        Ok(count) => reply(
            &HealthResponse {
                status: "ok",
                analyses: Some(count),
            },
            StatusCode::OK,
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            reply(
                &HealthResponse {
                    status: "unavailable",
                    analyses: None,
                },
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    })
}

/// Turn filter rejections into JSON error bodies
pub(crate) async fn rejection(err: warp::Rejection) -> Result<JsonReply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if err.find::<warp::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request body")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected application/json")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    };
    Ok(error_reply(message, status))
}
