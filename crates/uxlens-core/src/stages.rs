//! The two model-backed stages

use crate::error::{PipelineError, PipelineResult, Stage};
use crate::image::ImageData;
use crate::prompts::{behavior_prompt, ELEMENT_PROMPT};
use std::time::Instant;
use uxlens_gemini::{GenerationRequest, GenerativeModel};
use uxlens_model::{BehaviorReport, ElementInventory};
use uxlens_normalize::{normalize_behavior, normalize_elements};

/// Stage one: inventory the elements visible in the image
///
/// # Errors
/// Model failure, or a response with no usable JSON.
pub async fn analyze_ui_elements(
    model: &dyn GenerativeModel,
    image: &ImageData,
) -> PipelineResult<ElementInventory> {
    let started = Instant::now();
    let request = GenerationRequest::text(ELEMENT_PROMPT).with_image(image.to_inline());

    let text = model
        .generate(request)
        .await
        .map_err(|e| PipelineError::model(Stage::Elements, e))?;
    let inventory = normalize_elements(&text).map_err(|e| {
        tracing::warn!(error = %e, response_len = text.len(), "element response rejected");
        PipelineError::normalize(Stage::Elements, e)
    })?;

    tracing::debug!(
        elements = inventory.elements.len(),
        friction_points = inventory.friction_points.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "elements extracted"
    );
    Ok(inventory)
}

/// Stage two: predict behavior from the stage-one inventory
///
/// The prompt carries the inventory as JSON; no image is sent.
///
/// # Errors
/// As [`analyze_ui_elements`].
pub async fn predict_user_behavior(
    model: &dyn GenerativeModel,
    inventory: &ElementInventory,
) -> PipelineResult<BehaviorReport> {
    let started = Instant::now();
    let inventory_json =
        serde_json::to_string(inventory).map_err(|e| PipelineError::normalize(Stage::Behavior, e))?;

    let text = model
        .generate(GenerationRequest::text(behavior_prompt(&inventory_json)))
        .await
        .map_err(|e| PipelineError::model(Stage::Behavior, e))?;
    let report = normalize_behavior(&text).map_err(|e| {
        tracing::warn!(error = %e, response_len = text.len(), "behavior response rejected");
        PipelineError::normalize(Stage::Behavior, e)
    })?;

    tracing::debug!(
        hotspots = report.hotspots.as_ref().map_or(0, Vec::len),
        insights = report.insights.len(),
        has_metrics = report.metrics.is_some(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "behavior predicted"
    );
    Ok(report)
}
