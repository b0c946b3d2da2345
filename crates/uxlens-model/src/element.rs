//! UI element inventory (first analysis stage)

use serde::{Deserialize, Serialize};

/// Element category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Button,
    Link,
    Input,
    Navigation,
    Heading,
    Image,
    Text,
    Other,
}

impl ElementKind {
    /// Map a free-form type name onto a category
    ///
    /// Matching is case-insensitive and accepts common synonyms; anything
    /// unrecognised is [`ElementKind::Other`].
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "button" | "cta" | "call-to-action" | "call_to_action" => Self::Button,
            "link" | "anchor" => Self::Link,
            "input" | "form" | "field" | "textarea" | "select" | "checkbox" | "dropdown" => {
                Self::Input
            }
            "navigation" | "nav" | "menu" | "navbar" | "tab" | "tabs" => Self::Navigation,
            "heading" | "headline" | "title" | "header" => Self::Heading,
            "image" | "img" | "icon" | "logo" | "illustration" | "photo" => Self::Image,
            "text" | "paragraph" | "body" | "copy" | "label" => Self::Text,
            _ => Self::Other,
        }
    }

    /// Lowercase name as it appears on the wire
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Input => "input",
            Self::Navigation => "navigation",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Text => "text",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage-based location on the analysed image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal position, 0-100
    pub x: f64,
    /// Vertical position, 0-100
    pub y: f64,
}

/// A detected UI element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub label: String,
    /// Coarse placement keyword such as `top-left` or `center`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Importance from 1 (incidental) to 10 (primary)
    pub importance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Elements grouped by visual prominence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualHierarchy {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub tertiary: Vec<String>,
}

/// Validated output of the element-extraction stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInventory {
    #[serde(default)]
    pub elements: Vec<UiElement>,
    #[serde(default)]
    pub visual_hierarchy: VisualHierarchy,
    #[serde(default)]
    pub friction_points: Vec<String>,
}

impl ElementInventory {
    /// Elements at or above the given importance
    pub fn prominent(&self, min_importance: u8) -> impl Iterator<Item = &UiElement> {
        self.elements
            .iter()
            .filter(move |el| el.importance >= min_importance)
    }
}
