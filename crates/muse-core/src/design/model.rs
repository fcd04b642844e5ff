//! Design suggestion domain model.
//!
//! A `DesignSuggestion` is the fully-defaulted description of one proposed
//! design: palette, free-text element labels, layout notes, and the concrete
//! text elements and shapes that get replayed onto a canvas.

use serde::{Deserialize, Serialize};

/// Palette used whenever the model omits or empties `colors`.
pub const DEFAULT_PALETTE: [&str; 3] = ["#6366F1", "#EC4899", "#F59E0B"];

/// Element labels used whenever the model omits `elements`.
pub const DEFAULT_ELEMENTS: [&str; 3] = ["text", "shapes", "background"];

pub const DEFAULT_DESCRIPTION: &str = "AI-generated design concept";
pub const DEFAULT_LAYOUT: &str = "modern layout";

pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

pub const DEFAULT_SHAPE_COLOR: &str = "#6366F1";
pub const DEFAULT_SHAPE_SIZE: u32 = 100;

/// One complete design proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSuggestion {
    pub title: String,
    pub description: String,
    /// Hex color codes; `colors[0]` tints the background.
    pub colors: Vec<String>,
    pub elements: Vec<String>,
    pub layout: String,
    pub text_elements: Vec<TextElement>,
    pub shapes: Vec<ShapeSpec>,
}

/// A styled run of text placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub text: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub color: String,
}

/// Font weight as emitted by the model.
///
/// Only `normal` and `bold` are interpreted; any other keyword is carried
/// through verbatim for hosts that understand it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Other(String),
}

impl FontWeight {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "normal" => Self::Normal,
            "bold" => Self::Bold,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for FontWeight {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<FontWeight> for String {
    fn from(weight: FontWeight) -> Self {
        weight.as_str().to_string()
    }
}

/// A filled vector shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSpec {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub color: String,
    pub width: u32,
    pub height: u32,
}

/// Shapes the canvas engine knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    /// Parse from string. Unrecognized shapes draw as rectangles.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "circle" => Self::Circle,
            "triangle" => Self::Triangle,
            _ => Self::Rectangle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }
}

impl DesignSuggestion {
    /// Plain-text summary handed to the clipboard when the canvas is unreachable.
    pub fn clipboard_summary(&self) -> String {
        [
            format!("🎨 {}", self.title),
            format!("📝 {}", self.description),
            format!("🎨 Colors: {}", self.colors.join(", ")),
            format!("📋 Elements: {}", self.elements.join(", ")),
            format!("📐 Layout: {}", self.layout),
        ]
        .join("\n")
    }

    /// Background tint, if the design has a palette.
    pub fn primary_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_kind_is_case_insensitive() {
        assert_eq!(ShapeKind::from_str("Circle"), ShapeKind::Circle);
        assert_eq!(ShapeKind::from_str(" TRIANGLE "), ShapeKind::Triangle);
        assert_eq!(ShapeKind::from_str("line"), ShapeKind::Rectangle);
        assert_eq!(ShapeKind::from_str(""), ShapeKind::Rectangle);
    }

    #[test]
    fn test_font_weight_keeps_unknown_keywords() {
        assert_eq!(FontWeight::from_str("BOLD"), FontWeight::Bold);
        assert_eq!(FontWeight::from_str("semibold"), FontWeight::Other("semibold".to_string()));
        assert_eq!(FontWeight::from_str("semibold").as_str(), "semibold");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let element = TextElement {
            text: "Hello".to_string(),
            font_size: 48,
            font_weight: FontWeight::Bold,
            color: "#000000".to_string(),
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["fontSize"], 48);
        assert_eq!(json["fontWeight"], "bold");

        let shape = ShapeSpec {
            kind: ShapeKind::Circle,
            color: "#ff0000".to_string(),
            width: 10,
            height: 20,
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "circle");
    }

    #[test]
    fn test_clipboard_summary_lists_every_field() {
        let design = DesignSuggestion {
            title: "Latte Art".to_string(),
            description: "Warm tones".to_string(),
            colors: vec!["#111111".to_string(), "#222222".to_string()],
            elements: vec!["logo".to_string(), "menu".to_string()],
            layout: "centered".to_string(),
            text_elements: Vec::new(),
            shapes: Vec::new(),
        };
        let summary = design.clipboard_summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "🎨 Latte Art");
        assert_eq!(lines[2], "🎨 Colors: #111111, #222222");
        assert_eq!(lines[3], "📋 Elements: logo, menu");
        assert_eq!(lines[4], "📐 Layout: centered");
    }
}
