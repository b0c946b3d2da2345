//! Raw → validated conversion
//!
//! Entries that cannot be made meaningful (a hotspot without coordinates, an
//! insight without a title) are dropped. Everything else is coerced into
//! range.

use crate::repair::{clamp_percent, repair_metrics};
use uxlens_model::raw::{
    RawAnalysisDraft, RawBehaviorReport, RawElementInventory, RawHotspot, RawInsight,
    RawUiElement, RawVisualHierarchy,
};
use uxlens_model::{
    BehaviorReport, Coordinates, DesignScores, ElementInventory, ElementKind, Hotspot, Impact,
    Insight, Metrics, NewAnalysis, UiElement, VisualHierarchy,
};

/// Importance bounds for UI elements
const IMPORTANCE_MIN: f64 = 1.0;
const IMPORTANCE_MAX: f64 = 10.0;

/// Validate the element-extraction response
#[must_use]
pub fn normalize_inventory(raw: RawElementInventory) -> ElementInventory {
    let total = raw.elements.len();
    let elements: Vec<UiElement> = raw.elements.into_iter().filter_map(normalize_element).collect();
    if elements.len() < total {
        tracing::debug!(dropped = total - elements.len(), "dropped unusable elements");
    }

    ElementInventory {
        elements,
        visual_hierarchy: raw
            .visual_hierarchy
            .map(normalize_hierarchy)
            .unwrap_or_default(),
        friction_points: raw.friction_points,
    }
}

fn normalize_element(raw: RawUiElement) -> Option<UiElement> {
    if raw.kind.is_none() && raw.label.is_none() {
        return None;
    }
    let kind = raw
        .kind
        .as_deref()
        .map_or(ElementKind::Other, ElementKind::parse_lenient);
    let label = raw
        .label
        .or(raw.kind)
        .unwrap_or_else(|| kind.to_string());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let importance = raw
        .importance
        .map_or(IMPORTANCE_MIN, |v| v.round().clamp(IMPORTANCE_MIN, IMPORTANCE_MAX))
        as u8;

    let coordinates = raw.coordinates.and_then(|c| match (c.x, c.y) {
        (Some(x), Some(y)) => Some(Coordinates {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }),
        _ => None,
    });

    Some(UiElement {
        kind,
        label,
        position: raw.position,
        importance,
        coordinates,
    })
}

fn normalize_hierarchy(raw: RawVisualHierarchy) -> VisualHierarchy {
    VisualHierarchy {
        primary: raw.primary,
        secondary: raw.secondary,
        tertiary: raw.tertiary,
    }
}

/// Validate a hotspot; `None` when a coordinate or the intensity is missing
#[must_use]
pub fn normalize_hotspot(raw: RawHotspot) -> Option<Hotspot> {
    Some(Hotspot {
        x: clamp_percent(raw.x?),
        y: clamp_percent(raw.y?),
        intensity: clamp_percent(raw.intensity?),
        label: raw.label.unwrap_or_else(|| "Attention area".to_string()),
    })
}

/// Validate an insight; `None` when it has no title
#[must_use]
pub fn normalize_insight(raw: RawInsight) -> Option<Insight> {
    Some(Insight {
        title: raw.title?,
        description: raw.description.unwrap_or_default(),
        impact: raw
            .impact
            .as_deref()
            .map_or(Impact::default(), Impact::parse_lenient),
        category: raw.category,
        recommendation: raw.recommendation,
        expected_improvement: raw.expected_improvement.unwrap_or_default(),
        confidence: raw.confidence.map(clamp_percent),
    })
}

/// Validate and repair metrics; `None` when nothing numeric was supplied
#[must_use]
pub fn normalize_metrics(
    metrics: Option<Metrics>,
    separate_design: Option<DesignScores>,
) -> Option<Metrics> {
    let mut merged = metrics.unwrap_or_default();
    if let Some(extra) = separate_design {
        for (slot, value) in merged.design.axes_mut().into_iter().zip(extra.axes()) {
            if slot.is_none() {
                *slot = value;
            }
        }
        if merged.design.overall_score.is_none() {
            merged.design.overall_score = extra.overall_score;
        }
    }

    if merged.is_empty() {
        None
    } else {
        Some(repair_metrics(merged))
    }
}

/// Validate the behavior-prediction response
#[must_use]
pub fn normalize_report(raw: RawBehaviorReport) -> BehaviorReport {
    BehaviorReport {
        hotspots: raw
            .hotspots
            .map(|list| list.into_iter().filter_map(normalize_hotspot).collect()),
        metrics: normalize_metrics(raw.metrics, raw.design_scores),
        insights: raw.insights.into_iter().filter_map(normalize_insight).collect(),
        user_path: raw.user_path,
        drop_off_points: raw.drop_off_points,
        element_breakdown: raw.element_breakdown,
        strengths: raw.strengths,
    }
}

/// Validate an externally produced analysis
///
/// Uses the same rules as model output. Absent metrics become an empty
/// record rather than the model fallback: a stored draft reports only what
/// it was given.
#[must_use]
pub fn normalize_draft(raw: RawAnalysisDraft) -> NewAnalysis {
    NewAnalysis {
        file_name: raw.file_name.trim().to_string(),
        image_url: raw.image_url.trim().to_string(),
        metrics: normalize_metrics(raw.metrics, None).unwrap_or_default(),
        hotspots: raw.hotspots.into_iter().filter_map(normalize_hotspot).collect(),
        insights: raw.insights.into_iter().filter_map(normalize_insight).collect(),
        user_path: raw.user_path,
        element_breakdown: raw.element_breakdown,
        strengths: raw.strengths,
        drop_off_points: raw.drop_off_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uxlens_model::raw::RawCoordinates;

    #[test]
    fn element_without_type_or_label_is_dropped() {
        let raw = RawElementInventory {
            elements: vec![
                RawUiElement::default(),
                RawUiElement {
                    kind: Some("button".to_string()),
                    ..RawUiElement::default()
                },
            ],
            ..RawElementInventory::default()
        };

        let inventory = normalize_inventory(raw);
        assert_eq!(inventory.elements.len(), 1);
        assert_eq!(inventory.elements[0].kind, ElementKind::Button);
        assert_eq!(inventory.elements[0].label, "button");
        assert_eq!(inventory.elements[0].importance, 1);
    }

    #[test]
    fn element_values_are_clamped() {
        let raw = RawUiElement {
            kind: Some("link".to_string()),
            label: Some("Pricing".to_string()),
            position: Some("top-right".to_string()),
            importance: Some(14.0),
            coordinates: Some(RawCoordinates {
                x: Some(120.0),
                y: Some(-5.0),
            }),
        };

        let el = normalize_element(raw).unwrap();
        assert_eq!(el.importance, 10);
        assert_eq!(el.coordinates, Some(Coordinates { x: 100.0, y: 0.0 }));
        assert_eq!(el.position.as_deref(), Some("top-right"));
    }

    #[test]
    fn partial_coordinates_are_dropped() {
        let raw = RawUiElement {
            kind: Some("image".to_string()),
            coordinates: Some(RawCoordinates {
                x: Some(10.0),
                y: None,
            }),
            ..RawUiElement::default()
        };
        assert_eq!(normalize_element(raw).unwrap().coordinates, None);
    }

    #[test]
    fn hotspot_requires_coordinates_and_intensity() {
        let full = RawHotspot {
            x: Some(50.0),
            y: Some(140.0),
            intensity: Some(90.0),
            label: None,
        };
        let hotspot = normalize_hotspot(full).unwrap();
        assert_eq!(hotspot.y, 100.0);
        assert_eq!(hotspot.label, "Attention area");

        let missing = RawHotspot {
            x: Some(50.0),
            y: None,
            intensity: Some(90.0),
            label: Some("Hero".to_string()),
        };
        assert!(normalize_hotspot(missing).is_none());

        let no_intensity = RawHotspot {
            x: Some(50.0),
            y: Some(20.0),
            intensity: None,
            label: Some("Hero".to_string()),
        };
        assert!(normalize_hotspot(no_intensity).is_none());
    }

    #[test]
    fn report_keeps_missing_and_empty_hotspots_apart() {
        let missing = normalize_report(RawBehaviorReport::default());
        assert_eq!(missing.hotspots, None);

        let empty = normalize_report(RawBehaviorReport {
            hotspots: Some(Vec::new()),
            ..RawBehaviorReport::default()
        });
        assert_eq!(empty.hotspots, Some(Vec::new()));
    }

    #[test]
    fn insight_requires_title() {
        assert!(normalize_insight(RawInsight::default()).is_none());

        let insight = normalize_insight(RawInsight {
            title: Some("Shorten the form".to_string()),
            impact: Some("HIGH".to_string()),
            confidence: Some(130.0),
            ..RawInsight::default()
        })
        .unwrap();
        assert_eq!(insight.impact, Impact::High);
        assert_eq!(insight.confidence, Some(100.0));
        assert_eq!(insight.description, "");
    }

    #[test]
    fn metrics_merge_separate_design_scores() {
        let metrics = Metrics {
            design: DesignScores {
                visual_hierarchy: Some(80.0),
                ..DesignScores::default()
            },
            ..Metrics::default()
        };
        let extra = DesignScores {
            visual_hierarchy: Some(10.0),
            cta_clarity: Some(60.0),
            ..DesignScores::default()
        };

        let merged = normalize_metrics(Some(metrics), Some(extra)).unwrap();
        assert_eq!(merged.design.visual_hierarchy, Some(80.0));
        assert_eq!(merged.design.cta_clarity, Some(60.0));
        assert_eq!(merged.design.overall_score, Some(70.0));
    }

    #[test]
    fn empty_metrics_are_absent() {
        assert_eq!(normalize_metrics(None, None), None);
        assert_eq!(normalize_metrics(Some(Metrics::default()), None), None);
    }

    #[test]
    fn draft_is_trimmed_and_repaired() {
        let draft: RawAnalysisDraft = serde_json::from_value(serde_json::json!({
            "fileName": "  home.png ",
            "imageUrl": "data:image/png;base64,AAAA",
            "metrics": {"engagementScore": 95, "clickThroughRate": 80},
            "hotspots": [{"x": 1, "y": 2, "intensity": 3, "label": "a"}, {"x": 1}],
            "insights": [{"title": "t", "impact": "low"}]
        }))
        .unwrap();

        let analysis = normalize_draft(draft);
        assert_eq!(analysis.file_name, "home.png");
        assert_eq!(analysis.metrics.funnel.engagement_score, Some(75.0));
        assert_eq!(analysis.metrics.funnel.click_through_rate, Some(45.0));
        assert_eq!(analysis.hotspots.len(), 1);
        assert_eq!(analysis.insights[0].impact, Impact::Low);
    }
}
