//! Model prompts
//!
//! Both prompts ask for bare JSON; the normalizer copes when the model
//! wraps it anyway.

/// Stage one: inventory the interface elements in the attached image
pub const ELEMENT_PROMPT: &str = r#"Analyze this UI/UX design and identify all elements. Return ONLY valid JSON:

{
  "elements": [
    {
      "type": "button|link|input|navigation|heading|image|text",
      "label": "element text or description",
      "position": "top-left|top-center|top-right|center-left|center|center-right|bottom-left|bottom-center|bottom-right",
      "importance": 1-10,
      "coordinates": {"x": 0-100, "y": 0-100}
    }
  ],
  "visualHierarchy": {
    "primary": ["element labels"],
    "secondary": ["element labels"],
    "tertiary": ["element labels"]
  },
  "frictionPoints": ["description of issues"]
}

Focus on:
1. All clickable elements (buttons, links, CTAs)
2. Form fields and inputs
3. Navigation elements
4. Visual hierarchy
5. Potential UX friction points"#;

const BEHAVIOR_TEMPLATE: &str = r#"Predict user behavior and return ONLY valid JSON:

{
  "hotspots": [
    {"x": 0-100, "y": 0-100, "intensity": 0-100, "label": "description"}
  ],
  "metrics": {
    "expectedConversionRate": 0-100,
    "clickThroughRate": 0-100,
    "bounceRate": 0-100,
    "engagementScore": 0-100
  },
  "designScores": {
    "visualHierarchy": 0-100,
    "ctaClarity": 0-100,
    "informationDensity": 0-100,
    "colorHarmony": 0-100,
    "whitespaceUsage": 0-100,
    "mobileReadiness": 0-100,
    "overallScore": 0-100
  },
  "insights": [
    {
      "title": "short title",
      "description": "detailed description",
      "impact": "high|medium|low",
      "category": "layout|cta|navigation|forms|content|accessibility|mobile",
      "recommendation": "concrete change to make",
      "expectedImprovement": "+X% metric",
      "confidence": 0-100
    }
  ],
  "userPath": "description of eye-tracking pattern",
  "dropOffPoints": ["list of potential drop-off areas"],
  "elementBreakdown": {
    "cta_buttons": 0,
    "navigation": 0,
    "forms": 0,
    "headings": 0,
    "images": 0,
    "text_blocks": 0
  },
  "strengths": ["what the design does well"]
}

Percentages must be consistent: conversion below click-through, click-through below engagement.
Base predictions on UX principles: Fitts's Law, F-pattern, Z-pattern, visual hierarchy, cognitive load."#;

/// Stage two: predict behavior from the stage-one inventory JSON
#[must_use]
pub fn behavior_prompt(inventory_json: &str) -> String {
    format!("Given these UI elements: {inventory_json}\n\n{BEHAVIOR_TEMPLATE}")
}
