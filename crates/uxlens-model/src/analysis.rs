//! Behavior predictions and the persisted analysis record

use crate::id::AnalysisId;
use crate::metrics::{ElementBreakdown, Metrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Predicted zone of user attention
///
/// Coordinates and intensity are percentages in 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
    pub label: String,
}

/// Impact tier of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    #[default]
    Medium,
    High,
}

impl Impact {
    /// Case-insensitive tier lookup; unknown tiers read as medium
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "high" | "critical" => Self::High,
            "low" | "minor" => Self::Low,
            _ => Self::Medium,
        }
    }
}

/// Textual recommendation with an impact tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Free-form improvement estimate such as `+12% conversion rate`
    #[serde(default)]
    pub expected_improvement: String,
    /// Model confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Validated output of the behavior-prediction stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorReport {
    /// `None` when the model gave no hotspot list; an empty list is kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspots: Option<Vec<Hotspot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_path: Option<String>,
    #[serde(default)]
    pub drop_off_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_breakdown: Option<ElementBreakdown>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

/// Analysis contents before the store has issued an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysis {
    pub file_name: String,
    /// Reference to the analysed image (data URL or remote URL)
    pub image_url: String,
    pub metrics: Metrics,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub user_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_breakdown: Option<ElementBreakdown>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub drop_off_points: Vec<String>,
}

impl NewAnalysis {
    /// Attach identity and timestamps
    #[must_use]
    pub fn into_analysis(self, id: AnalysisId, now: DateTime<Utc>) -> Analysis {
        Analysis {
            id,
            file_name: self.file_name,
            image_url: self.image_url,
            metrics: self.metrics,
            hotspots: self.hotspots,
            insights: self.insights,
            user_path: self.user_path,
            element_breakdown: self.element_breakdown,
            strengths: self.strengths,
            drop_off_points: self.drop_off_points,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A persisted analysis
///
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(alias = "_id")]
    pub id: AnalysisId,
    pub file_name: String,
    pub image_url: String,
    pub metrics: Metrics,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub user_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_breakdown: Option<ElementBreakdown>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub drop_off_points: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
