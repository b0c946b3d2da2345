//! Raw model responses
//!
//! Loosely shaped mirrors of what the prompts ask a generative model to
//! return. Nothing here is trusted: every field is optional, numbers are read
//! through [`crate::lenient`], and malformed list entries are skipped. The
//! normalizer turns these into the validated types.

use crate::lenient;
use crate::metrics::{DesignScores, ElementBreakdown, Metrics};
use serde::Deserialize;

/// Element position as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCoordinates {
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
}

/// Element entry as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawUiElement {
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub importance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub coordinates: Option<RawCoordinates>,
}

/// Visual hierarchy as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawVisualHierarchy {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub primary: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub secondary: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub tertiary: Vec<String>,
}

/// Element-extraction response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElementInventory {
    #[serde(default, deserialize_with = "lenient::list")]
    pub elements: Vec<RawUiElement>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub visual_hierarchy: Option<RawVisualHierarchy>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub friction_points: Vec<String>,
}

/// Hotspot entry as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHotspot {
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub intensity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub label: Option<String>,
}

/// Insight entry as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInsight {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub expected_improvement: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub confidence: Option<f64>,
}

/// Behavior-prediction response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBehaviorReport {
    /// `None` when the model omitted the key entirely
    #[serde(default, deserialize_with = "optional_list")]
    pub hotspots: Option<Vec<RawHotspot>>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub metrics: Option<Metrics>,
    /// Design axes supplied outside the metrics object
    #[serde(default, deserialize_with = "lenient::object")]
    pub design_scores: Option<DesignScores>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub insights: Vec<RawInsight>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub drop_off_points: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub element_breakdown: Option<ElementBreakdown>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub strengths: Vec<String>,
}

/// Externally produced analysis submitted for storage
///
/// Same leniency as a model response, but the file name and image
/// reference are required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysisDraft {
    pub file_name: String,
    #[serde(alias = "image")]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient::object")]
    pub metrics: Option<Metrics>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub hotspots: Vec<RawHotspot>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub insights: Vec<RawInsight>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub element_breakdown: Option<ElementBreakdown>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub drop_off_points: Vec<String>,
}

fn optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_inventory_skips_malformed_elements() {
        let raw: RawElementInventory = serde_json::from_value(json!({
            "elements": [
                {"type": "button", "label": "Buy", "importance": "9",
                 "coordinates": {"x": 50, "y": "40"}},
                "not an element",
                {"type": "link"}
            ],
            "frictionPoints": ["slow hero", 7]
        }))
        .unwrap();

        assert_eq!(raw.elements.len(), 2);
        assert_eq!(raw.elements[0].importance, Some(9.0));
        assert_eq!(
            raw.elements[0].coordinates,
            Some(RawCoordinates {
                x: Some(50.0),
                y: Some(40.0)
            })
        );
        assert_eq!(raw.friction_points, vec!["slow hero".to_string()]);
        assert!(raw.visual_hierarchy.is_none());
    }

    #[test]
    fn raw_report_distinguishes_missing_and_empty_hotspots() {
        let missing: RawBehaviorReport = serde_json::from_value(json!({})).unwrap();
        assert!(missing.hotspots.is_none());

        let empty: RawBehaviorReport = serde_json::from_value(json!({"hotspots": []})).unwrap();
        assert_eq!(empty.hotspots, Some(Vec::new()));
    }

    #[test]
    fn raw_report_reads_metrics_leniently() {
        let raw: RawBehaviorReport = serde_json::from_value(json!({
            "metrics": {"engagementScore": "72", "bounceRate": "n/a"},
            "userPath": "Z-pattern"
        }))
        .unwrap();

        let metrics = raw.metrics.unwrap();
        assert_eq!(metrics.funnel.engagement_score, Some(72.0));
        assert_eq!(metrics.funnel.bounce_rate, None);
        assert_eq!(raw.user_path.as_deref(), Some("Z-pattern"));
    }

    #[test]
    fn raw_report_ignores_non_object_metrics() {
        let raw: RawBehaviorReport =
            serde_json::from_value(json!({"metrics": "unavailable", "elementBreakdown": [1, 2]}))
                .unwrap();
        assert!(raw.metrics.is_none());
        assert!(raw.element_breakdown.is_none());
    }

    #[test]
    fn draft_requires_file_name_and_image() {
        let missing = serde_json::from_value::<RawAnalysisDraft>(json!({"fileName": "a.png"}));
        assert!(missing.is_err());

        let ok: RawAnalysisDraft =
            serde_json::from_value(json!({"fileName": "a.png", "image": "data:image/png;base64,AA"}))
                .unwrap();
        assert_eq!(ok.image_url, "data:image/png;base64,AA");
    }
}
