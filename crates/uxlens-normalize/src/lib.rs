//! UX Lens Response Normalizer
//!
//! The trusted boundary between generative-model text and the analysis
//! record. Model responses are untrusted: they may wrap the JSON in prose or
//! a fenced code block, use strings for numbers, or return metrics that
//! contradict each other.
//!
//! # Pipeline
//!
//! ```text
//! text → extract_json → serde_json → Raw* (lenient) → normalize_* → validated record
//!                                                        ↑
//!                                            repair_funnel / complete_design_scores
//! ```
//!
//! Every function here is pure.
//!
//! # Example
//!
//! ```rust
//! use uxlens_normalize::normalize_behavior;
//!
//! let text = "Here you go:\n```json\n{\"metrics\": {\"engagementScore\": 60, \"clickThroughRate\": 70}}\n```";
//! let report = normalize_behavior(text).unwrap();
//! let funnel = report.metrics.unwrap().funnel;
//!
//! assert_eq!(funnel.click_through_rate, Some(36.0));
//! assert_eq!(funnel.bounce_rate, Some(40.0));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod convert;
pub mod error;
pub mod extract;
pub mod repair;

pub use convert::{
    normalize_draft, normalize_hotspot, normalize_insight, normalize_inventory, normalize_metrics,
    normalize_report,
};
pub use error::{NormalizeError, NormalizeResult};
pub use extract::{extract_json, extract_object, parse_response};
pub use repair::{complete_design_scores, mean_score, repair_funnel, repair_metrics};

use uxlens_model::raw::{RawBehaviorReport, RawElementInventory};
use uxlens_model::{BehaviorReport, ElementInventory};

/// Normalize a behavior-prediction response
///
/// # Errors
/// Format error when no JSON payload is present; parse error when the
/// payload is malformed. No partial record is returned.
pub fn normalize_behavior(text: &str) -> NormalizeResult<BehaviorReport> {
    let raw: RawBehaviorReport = parse_response(text)?;
    Ok(normalize_report(raw))
}

/// Normalize an element-extraction response
///
/// # Errors
/// As [`normalize_behavior`].
pub fn normalize_elements(text: &str) -> NormalizeResult<ElementInventory> {
    let raw: RawElementInventory = parse_response(text)?;
    Ok(normalize_inventory(raw))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use uxlens_model::Impact;

    const BEHAVIOR_RESPONSE: &str = r#"Based on Fitts's Law and F-pattern scanning:

```json
{
  "hotspots": [
    {"x": 50, "y": 40, "intensity": 90, "label": "Hero CTA"},
    {"x": "30", "y": 60, "intensity": 65, "label": "Feature grid"}
  ],
  "metrics": {
    "expectedConversionRate": 12,
    "clickThroughRate": 9,
    "bounceRate": 10,
    "engagementScore": 120,
    "visualHierarchy": 80,
    "ctaClarity": 60,
    "informationDensity": 40,
    "colorHarmony": 100,
    "whitespaceUsage": 70,
    "mobileReadiness": 50
  },
  "insights": [
    {"title": "Strong visual hierarchy", "description": "CTA stands out",
     "impact": "High", "expectedImprovement": "+12% conversion rate", "confidence": 87}
  ],
  "userPath": "logo → headline → CTA",
  "dropOffPoints": ["pricing table"]
}
```
"#;

    #[test]
    fn behavior_response_end_to_end() {
        let report = normalize_behavior(BEHAVIOR_RESPONSE).unwrap();

        let hotspots = report.hotspots.unwrap();
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[1].x, 30.0);

        let metrics = report.metrics.unwrap();
        assert_eq!(metrics.funnel.engagement_score, Some(75.0));
        assert_eq!(metrics.funnel.click_through_rate, Some(9.0));
        assert_eq!(metrics.funnel.expected_conversion_rate, Some(2.0));
        assert_eq!(metrics.funnel.bounce_rate, Some(25.0));
        assert_eq!(metrics.design.overall_score, Some(67.0));

        assert_eq!(report.insights[0].impact, Impact::High);
        assert_eq!(report.user_path.as_deref(), Some("logo → headline → CTA"));
        assert_eq!(report.drop_off_points, vec!["pricing table".to_string()]);
    }

    #[test]
    fn element_response_end_to_end() {
        let text = r#"{"elements": [{"type": "button", "label": "Get Started", "position": "center",
            "importance": 10, "coordinates": {"x": 50, "y": 40}}],
            "visualHierarchy": {"primary": ["Get Started"]},
            "frictionPoints": ["Low contrast footer"]}"#;

        let inventory = normalize_elements(text).unwrap();
        assert_eq!(inventory.elements.len(), 1);
        assert_eq!(inventory.visual_hierarchy.primary, vec!["Get Started".to_string()]);
        assert_eq!(inventory.friction_points.len(), 1);
    }

    #[test]
    fn malformed_payload_returns_no_partial_record() {
        let err = normalize_behavior("```json\n{\"metrics\": {\"engagementScore\": 60,}\n```")
            .unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn prose_only_is_format_error() {
        let err = normalize_elements("Sorry, I can't help with that.").unwrap_err();
        assert!(err.is_format_error());
    }
}
