//! Metric records
//!
//! Predicted conversion-funnel percentages, the 0-100 design-quality axes and
//! element counts. Numeric fields are optional: a value the model did not
//! supply stays absent rather than becoming zero.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Predicted conversion funnel, all values in percent
///
/// Stages strictly decrease from engagement through click-through to
/// conversion once normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorMetrics {
    /// Share of visitors who convert
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub expected_conversion_rate: Option<f64>,
    /// Share of visitors who click the primary call to action
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub click_through_rate: Option<f64>,
    /// Share of visitors who leave without interacting
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub bounce_rate: Option<f64>,
    /// Share of visitors who engage with the page
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub engagement_score: Option<f64>,
}

impl BehaviorMetrics {
    /// Fallback funnel used when the model returns no metrics at all
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            expected_conversion_rate: Some(3.8),
            click_through_rate: Some(15.2),
            bounce_rate: Some(42.0),
            engagement_score: Some(8.2),
        }
    }

    /// True when no funnel value is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expected_conversion_rate.is_none()
            && self.click_through_rate.is_none()
            && self.bounce_rate.is_none()
            && self.engagement_score.is_none()
    }
}

/// Multi-axis design-quality scores, each 0-100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignScores {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub visual_hierarchy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub cta_clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub information_density: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub color_harmony: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub whitespace_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub mobile_readiness: Option<f64>,
    /// Aggregate of the six axes
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

impl DesignScores {
    /// The six sub-scores in a fixed order
    #[must_use]
    pub fn axes(&self) -> [Option<f64>; 6] {
        [
            self.visual_hierarchy,
            self.cta_clarity,
            self.information_density,
            self.color_harmony,
            self.whitespace_usage,
            self.mobile_readiness,
        ]
    }

    /// Mutable access to the six sub-scores
    pub fn axes_mut(&mut self) -> [&mut Option<f64>; 6] {
        [
            &mut self.visual_hierarchy,
            &mut self.cta_clarity,
            &mut self.information_density,
            &mut self.color_harmony,
            &mut self.whitespace_usage,
            &mut self.mobile_readiness,
        ]
    }

    /// True when no axis and no overall score is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall_score.is_none() && self.axes().iter().all(Option::is_none)
    }
}

/// Combined metrics record as persisted
///
/// Funnel and design axes share one flat JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(flatten)]
    pub funnel: BehaviorMetrics,
    #[serde(flatten)]
    pub design: DesignScores,
}

impl Metrics {
    /// True when neither funnel nor design values are present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funnel.is_empty() && self.design.is_empty()
    }
}

/// Count of detected elements per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBreakdown {
    #[serde(default, deserialize_with = "lenient::count")]
    pub cta_buttons: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub navigation: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub forms: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub headings: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub images: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub text_blocks: u32,
}

impl ElementBreakdown {
    /// Total elements across all categories
    #[must_use]
    pub fn total(&self) -> u32 {
        [
            self.navigation,
            self.forms,
            self.headings,
            self.images,
            self.text_blocks,
        ]
        .into_iter()
        .fold(self.cta_buttons, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn metrics_flatten_reads_both_groups() {
        let metrics: Metrics = serde_json::from_value(json!({
            "engagementScore": 64,
            "clickThroughRate": "30%",
            "visualHierarchy": 80,
            "overallScore": null
        }))
        .unwrap();

        assert_eq!(metrics.funnel.engagement_score, Some(64.0));
        assert_eq!(metrics.funnel.click_through_rate, Some(30.0));
        assert_eq!(metrics.funnel.bounce_rate, None);
        assert_eq!(metrics.design.visual_hierarchy, Some(80.0));
        assert_eq!(metrics.design.overall_score, None);
    }

    #[test]
    fn metrics_skip_absent_fields_when_serialized() {
        let metrics = Metrics {
            funnel: BehaviorMetrics {
                engagement_score: Some(60.0),
                ..BehaviorMetrics::default()
            },
            design: DesignScores::default(),
        };

        assert_eq!(
            serde_json::to_value(metrics).unwrap(),
            json!({"engagementScore": 60.0})
        );
    }

    #[test]
    fn empty_checks() {
        assert!(Metrics::default().is_empty());
        assert!(!BehaviorMetrics::fallback().is_empty());

        let scores = DesignScores {
            color_harmony: Some(10.0),
            ..DesignScores::default()
        };
        assert!(!scores.is_empty());
    }

    #[test]
    fn breakdown_total() {
        let breakdown: ElementBreakdown =
            serde_json::from_value(json!({"cta_buttons": 2, "forms": "1", "images": 3})).unwrap();
        assert_eq!(breakdown.total(), 6);
        assert_eq!(breakdown.navigation, 0);
    }

    #[test]
    fn breakdown_total_saturates() {
        let breakdown = ElementBreakdown {
            cta_buttons: u32::MAX,
            images: 5,
            ..ElementBreakdown::default()
        };
        assert_eq!(breakdown.total(), u32::MAX);
    }
}
