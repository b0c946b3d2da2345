//! Testing utilities for the UX Lens workspace
//!
//! Shared test doubles and fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use uxlens_gemini::{GenerationRequest, GenerativeModel, ModelError};
use uxlens_model::{BehaviorMetrics, Hotspot, Impact, Insight, Metrics, NewAnalysis};

/// Smallest valid PNG as a data URL
pub const SAMPLE_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Stage-one response: prose around a fenced inventory
pub const ELEMENT_RESPONSE: &str = r#"Here is the element inventory:

```json
{
  "elements": [
    {"type": "button", "label": "Start free trial", "position": "top-right", "importance": 9,
     "coordinates": {"x": 82, "y": 8}},
    {"type": "navigation", "label": "Main menu", "position": "top-center", "importance": 6},
    {"type": "heading", "label": "Ship faster", "position": "center", "importance": "8"},
    {"type": "input", "label": "Email", "position": "bottom-left", "importance": 7},
    {"type": "image", "label": "Hero", "position": "center-right", "importance": 4}
  ],
  "visualHierarchy": {
    "primary": "Start free trial",
    "secondary": "Ship faster",
    "tertiary": "Main menu"
  },
  "frictionPoints": ["Email field lacks a label"]
}
```"#;

/// Stage-two response with contradictory funnel numbers
pub const BEHAVIOR_RESPONSE: &str = r#"```json
{
  "hotspots": [
    {"x": 82, "y": 8, "intensity": 95, "label": "Start free trial"},
    {"x": 50, "y": 30, "intensity": "70%", "label": "Ship faster"}
  ],
  "metrics": {
    "expectedConversionRate": 30,
    "clickThroughRate": 90,
    "bounceRate": 10,
    "engagementScore": 72
  },
  "designScores": {
    "visualHierarchy": 80,
    "ctaClarity": 60,
    "informationDensity": 40,
    "colorHarmony": 100,
    "whitespaceUsage": 70,
    "mobileReadiness": 50
  },
  "insights": [
    {"title": "Label the email field", "description": "Placeholder-only inputs lose context",
     "impact": "HIGH", "category": "forms", "expectedImprovement": "+6% conversion rate",
     "confidence": 80},
    {"title": "Reduce hero image weight", "description": "Slow first paint",
     "impact": "unclear", "expectedImprovement": "+2% engagement"}
  ],
  "userPath": "Heading → CTA → email capture",
  "dropOffPoints": ["Email capture"],
  "strengths": ["Single clear call to action"]
}
```"#;

/// Stage-two response with nothing the pipeline can use directly
pub const SPARSE_BEHAVIOR_RESPONSE: &str = r#"{"insights": []}"#;

/// Model double that replays scripted responses in order and records calls
#[derive(Debug, Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model that answers stage one then stage two
    pub fn two_stage(elements: &str, behavior: &str) -> Self {
        Self::new().then_text(elements).then_text(behavior)
    }

    #[must_use]
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.responses.lock().push_back(Ok(text.into()));
        self
    }

    #[must_use]
    pub fn then_error(self, error: ModelError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ModelError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Decode("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Model double that never answers
#[derive(Debug, Default)]
pub struct StalledModel;

#[async_trait]
impl GenerativeModel for StalledModel {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, ModelError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

pub fn sample_new_analysis() -> NewAnalysis {
    NewAnalysis {
        file_name: "landing.png".to_string(),
        image_url: SAMPLE_DATA_URL.to_string(),
        metrics: Metrics {
            funnel: BehaviorMetrics {
                expected_conversion_rate: Some(3.0),
                click_through_rate: Some(15.0),
                bounce_rate: Some(35.0),
                engagement_score: Some(65.0),
            },
            ..Metrics::default()
        },
        hotspots: vec![Hotspot {
            x: 82.0,
            y: 8.0,
            intensity: 90.0,
            label: "Start free trial".to_string(),
        }],
        insights: vec![Insight {
            title: "Label the email field".to_string(),
            description: "Placeholder-only inputs lose context".to_string(),
            impact: Impact::High,
            category: None,
            recommendation: None,
            expected_improvement: "+6% conversion rate".to_string(),
            confidence: None,
        }],
        user_path: Some("F-pattern detected".to_string()),
        element_breakdown: None,
        strengths: Vec::new(),
        drop_off_points: Vec::new(),
    }
}

/// Client-produced draft as posted to the save endpoint
pub fn sample_draft_json() -> Value {
    json!({
        "fileName": "  pricing.png ",
        "imageUrl": SAMPLE_DATA_URL,
        "metrics": {
            "engagementScore": "95",
            "clickThroughRate": 99,
            "expectedConversionRate": 50,
            "bounceRate": 2
        },
        "hotspots": [
            {"x": 10, "y": 10, "intensity": 80, "label": "Plans"},
            {"x": 10, "label": "missing coordinates"}
        ],
        "insights": [{"title": "Highlight the recommended plan", "impact": "medium"}],
        "userPath": "Z-pattern"
    })
}
