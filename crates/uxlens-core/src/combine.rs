//! Merge stage outputs into a record
//!
//! Stage two may leave gaps. They are filled from the stage-one inventory
//! where possible and from fixed defaults otherwise.

use uxlens_model::{
    BehaviorMetrics, BehaviorReport, ElementBreakdown, ElementInventory, ElementKind, Hotspot,
    Metrics, NewAnalysis, UiElement,
};
use uxlens_normalize::repair_metrics;

/// Elements at or above this importance become hotspots
pub const HOTSPOT_MIN_IMPORTANCE: u8 = 7;

/// User path when the model gives none
pub const DEFAULT_USER_PATH: &str = "F-pattern detected";

/// Derive hotspots from prominent elements
///
/// Location comes from the element coordinates when present, otherwise from
/// its position keyword. Intensity is `importance * 10`.
#[must_use]
pub fn hotspots_from_elements(inventory: &ElementInventory) -> Vec<Hotspot> {
    inventory
        .prominent(HOTSPOT_MIN_IMPORTANCE)
        .map(|element| {
            let (x, y) = element
                .coordinates
                .map_or_else(|| position_point(element.position.as_deref()), |c| (c.x, c.y));
            Hotspot {
                x,
                y,
                intensity: f64::from(element.importance) * 10.0,
                label: element.label.clone(),
            }
        })
        .collect()
}

/// Map a keyword such as `top-right` or `center-hero` onto a fixed grid
fn position_point(position: Option<&str>) -> (f64, f64) {
    let keyword = position.unwrap_or_default().to_ascii_lowercase();
    let x = if keyword.contains("left") {
        20.0
    } else if keyword.contains("right") {
        80.0
    } else {
        50.0
    };
    let y = if keyword.contains("top") || keyword.contains("header") {
        15.0
    } else if keyword.contains("bottom") || keyword.contains("footer") {
        85.0
    } else {
        50.0
    };
    (x, y)
}

/// Count inventory elements per breakdown category
///
/// Links count as navigation; unclassified elements are not counted.
#[must_use]
pub fn breakdown_from_inventory(inventory: &ElementInventory) -> ElementBreakdown {
    inventory
        .elements
        .iter()
        .fold(ElementBreakdown::default(), |mut acc, UiElement { kind, .. }| {
            match kind {
                ElementKind::Button => acc.cta_buttons += 1,
                ElementKind::Navigation | ElementKind::Link => acc.navigation += 1,
                ElementKind::Input => acc.forms += 1,
                ElementKind::Heading => acc.headings += 1,
                ElementKind::Image => acc.images += 1,
                ElementKind::Text => acc.text_blocks += 1,
                ElementKind::Other => {}
            }
            acc
        })
}

/// Metrics used when the model predicts none, after funnel repair
#[must_use]
pub fn fallback_metrics() -> Metrics {
    repair_metrics(Metrics {
        funnel: BehaviorMetrics::fallback(),
        ..Metrics::default()
    })
}

/// Build the record to persist
#[must_use]
pub fn combine(
    file_name: &str,
    image_url: &str,
    inventory: &ElementInventory,
    report: BehaviorReport,
) -> NewAnalysis {
    let hotspots = report.hotspots.unwrap_or_else(|| {
        let generated = hotspots_from_elements(inventory);
        tracing::debug!(count = generated.len(), "hotspots generated from elements");
        generated
    });

    let breakdown = report
        .element_breakdown
        .unwrap_or_else(|| breakdown_from_inventory(inventory));
    tracing::debug!(
        hotspots = hotspots.len(),
        elements = breakdown.total(),
        insights = report.insights.len(),
        "analysis combined"
    );

    NewAnalysis {
        file_name: file_name.to_string(),
        image_url: image_url.to_string(),
        metrics: report.metrics.unwrap_or_else(fallback_metrics),
        hotspots,
        insights: report.insights,
        user_path: Some(
            report
                .user_path
                .unwrap_or_else(|| DEFAULT_USER_PATH.to_string()),
        ),
        element_breakdown: Some(breakdown),
        strengths: report.strengths,
        drop_off_points: report.drop_off_points,
    }
}
