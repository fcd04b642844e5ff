//! Turns raw model output into complete design suggestions.
//!
//! Recovery happens on two tiers. A payload that parses but is missing
//! optional fields is completed field by field. A payload that cannot be
//! located, parsed, or walked is replaced wholesale by a single design built
//! from the user's own intent. Callers of [`normalize`] never see an error.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::model::{
    DesignSuggestion, FontWeight, ShapeKind, ShapeSpec, TextElement, DEFAULT_DESCRIPTION,
    DEFAULT_ELEMENTS, DEFAULT_FONT_SIZE, DEFAULT_LAYOUT, DEFAULT_PALETTE, DEFAULT_SHAPE_COLOR,
    DEFAULT_SHAPE_SIZE, DEFAULT_TEXT_COLOR,
};

/// Longest slice of the intent quoted in a fallback title.
const FALLBACK_TITLE_CHARS: usize = 30;

/// Structural failures that trigger the whole-response fallback.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response has no designs array")]
    MissingDesigns,

    #[error("Designs array is empty")]
    EmptyDesigns,

    #[error("Design {index} is malformed: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Result of validating a single `designs` entry.
#[derive(Debug)]
pub enum EntryOutcome {
    Valid(DesignSuggestion),
    Invalid(String),
}

/// A `designs` entry exactly as the model wrote it.
///
/// Every field is optional and untyped here; typing and defaulting happen in
/// [`complete_design`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDesign {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    colors: Option<Value>,
    #[serde(default)]
    elements: Option<Value>,
    #[serde(default)]
    layout: Option<Value>,
    #[serde(default)]
    text_elements: Option<Value>,
    #[serde(default)]
    shapes: Option<Value>,
}

/// Normalize raw model text into at least one complete design.
pub fn normalize(raw: &str, user_prompt: &str) -> Vec<DesignSuggestion> {
    match parse_designs(raw, user_prompt) {
        Ok(designs) => {
            debug!(count = designs.len(), "Normalized model response");
            designs
        }
        Err(e) => {
            warn!(error = %e, "Model response unusable, falling back to prompt-derived design");
            vec![fallback_design(user_prompt)]
        }
    }
}

/// Parse and complete every design in `raw`, or report why the response is
/// structurally unusable.
pub fn parse_designs(raw: &str, user_prompt: &str) -> Result<Vec<DesignSuggestion>, NormalizeError> {
    let payload: Value = serde_json::from_str(extract_json(raw))?;

    let entries = match payload {
        Value::Object(mut map) => match map.remove("designs") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(NormalizeError::MissingDesigns),
        },
        Value::Array(entries) => entries,
        _ => return Err(NormalizeError::MissingDesigns),
    };

    if entries.is_empty() {
        return Err(NormalizeError::EmptyDesigns);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match validate_entry(index, entry, user_prompt) {
            EntryOutcome::Valid(design) => Ok(design),
            EntryOutcome::Invalid(reason) => Err(NormalizeError::InvalidEntry { index, reason }),
        })
        .collect()
}

/// Strictly parse one `designs` entry, then fill its optional fields.
pub fn validate_entry(index: usize, entry: Value, user_prompt: &str) -> EntryOutcome {
    let raw = match entry {
        Value::Object(map) => match serde_json::from_value::<RawDesign>(Value::Object(map)) {
            Ok(raw) => raw,
            Err(e) => return EntryOutcome::Invalid(e.to_string()),
        },
        other => return EntryOutcome::Invalid(format!("expected an object, found {}", kind_of(&other))),
    };

    EntryOutcome::Valid(complete_design(index, raw, user_prompt))
}

/// Locate the JSON payload inside arbitrarily wrapped model text.
///
/// A fenced block wins (```` ```json ```` before a bare fence). The body is
/// returned as is when it already parses; otherwise it is cut to the span
/// opened by whichever of `{` or `[` comes first and closed by the last
/// matching bracket.
pub fn extract_json(text: &str) -> &str {
    let body = fenced_body(text).unwrap_or_else(|| text.trim());

    if serde_json::from_str::<IgnoredAny>(body).is_ok() {
        return body;
    }

    outermost_span(body).unwrap_or(body)
}

fn fenced_body(text: &str) -> Option<&str> {
    ["```json", "```"].into_iter().find_map(|marker| {
        let start = text.find(marker)? + marker.len();
        let len = text[start..].find("```")?;
        Some(text[start..start + len].trim())
    })
}

fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close).filter(|end| *end > start)?;
    Some(&text[start..=end])
}

/// The single design produced when the response cannot be used at all.
pub fn fallback_design(user_prompt: &str) -> DesignSuggestion {
    DesignSuggestion {
        title: format!("Design for: {}", truncate_chars(user_prompt, FALLBACK_TITLE_CHARS)),
        description: DEFAULT_DESCRIPTION.to_string(),
        colors: palette(),
        elements: vec![
            "custom text".to_string(),
            "decorative elements".to_string(),
            "background".to_string(),
        ],
        layout: "balanced and visually appealing".to_string(),
        text_elements: vec![
            TextElement {
                text: user_prompt.to_string(),
                font_size: 48,
                font_weight: FontWeight::Bold,
                color: DEFAULT_PALETTE[1].to_string(),
            },
            TextElement {
                text: "AI Generated Design".to_string(),
                font_size: 24,
                font_weight: FontWeight::Normal,
                color: DEFAULT_PALETTE[0].to_string(),
            },
        ],
        shapes: vec![ShapeSpec {
            kind: ShapeKind::Rectangle,
            color: DEFAULT_PALETTE[2].to_string(),
            width: 200,
            height: 100,
        }],
    }
}

fn complete_design(index: usize, raw: RawDesign, user_prompt: &str) -> DesignSuggestion {
    let title = non_empty_str(raw.title.as_ref());
    let description = non_empty_str(raw.description.as_ref());
    // Synthesized text and shapes take their colors from what the model
    // actually wrote, not from the default palette.
    let provided_colors = string_list(raw.colors.as_ref()).unwrap_or_default();
    let provided_color = |i: usize| provided_colors.get(i).map(String::as_str);

    let text_elements = raw
        .text_elements
        .as_ref()
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(text_element).collect::<Vec<_>>())
        .filter(|elements| !elements.is_empty())
        .unwrap_or_else(|| {
            vec![
                TextElement {
                    text: title
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{} Title", user_prompt)),
                    font_size: 48,
                    font_weight: FontWeight::Bold,
                    color: provided_color(1).unwrap_or(DEFAULT_TEXT_COLOR).to_string(),
                },
                TextElement {
                    text: description.unwrap_or("Subtitle").to_string(),
                    font_size: 24,
                    font_weight: FontWeight::Normal,
                    color: provided_color(2).unwrap_or("#666666").to_string(),
                },
            ]
        });

    let shapes = raw
        .shapes
        .as_ref()
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(shape_spec).collect::<Vec<_>>())
        .filter(|shapes| !shapes.is_empty())
        .unwrap_or_else(|| {
            vec![ShapeSpec {
                kind: ShapeKind::Rectangle,
                color: provided_color(0).unwrap_or(DEFAULT_SHAPE_COLOR).to_string(),
                width: 200,
                height: 100,
            }]
        });

    let colors = if provided_colors.is_empty() {
        palette()
    } else {
        provided_colors
    };

    DesignSuggestion {
        title: title
            .map(str::to_string)
            .unwrap_or_else(|| format!("Design {}", index + 1)),
        description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        colors,
        elements: string_list(raw.elements.as_ref())
            .filter(|elements| !elements.is_empty())
            .unwrap_or_else(|| DEFAULT_ELEMENTS.iter().map(|s| s.to_string()).collect()),
        layout: non_empty_str(raw.layout.as_ref())
            .unwrap_or(DEFAULT_LAYOUT)
            .to_string(),
        text_elements,
        shapes,
    }
}

/// A text entry is kept only if it is an object with non-empty text.
fn text_element(value: &Value) -> Option<TextElement> {
    let obj = value.as_object()?;
    let text = non_empty_str(obj.get("text"))?;

    Some(TextElement {
        text: text.to_string(),
        font_size: positive_int(obj.get("fontSize")).unwrap_or(DEFAULT_FONT_SIZE),
        font_weight: obj
            .get("fontWeight")
            .and_then(Value::as_str)
            .map(FontWeight::from_str)
            .unwrap_or_default(),
        color: non_empty_str(obj.get("color"))
            .unwrap_or(DEFAULT_TEXT_COLOR)
            .to_string(),
    })
}

/// A shape entry is kept if it is an object; everything inside is defaultable.
fn shape_spec(value: &Value) -> Option<ShapeSpec> {
    let obj = value.as_object()?;

    Some(ShapeSpec {
        kind: obj
            .get("type")
            .and_then(Value::as_str)
            .map(ShapeKind::from_str)
            .unwrap_or_default(),
        color: non_empty_str(obj.get("color"))
            .unwrap_or(DEFAULT_SHAPE_COLOR)
            .to_string(),
        width: positive_int(obj.get("width")).unwrap_or(DEFAULT_SHAPE_SIZE),
        height: positive_int(obj.get("height")).unwrap_or(DEFAULT_SHAPE_SIZE),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// String entries of an array, or `None` if the value is not an array.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let entries = value?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| non_empty_str(Some(entry)))
            .map(str::to_string)
            .collect(),
    )
}

fn positive_int(value: Option<&Value>) -> Option<u32> {
    let number = value?;
    if let Some(n) = number.as_u64() {
        return u32::try_from(n).ok().filter(|n| *n > 0);
    }
    number
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 1.0 && *n <= u32::MAX as f64)
        .map(|n| n.round() as u32)
}

fn palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect()
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = "modern poster for a coffee shop";

    fn three_designs_json() -> String {
        let design = |n: usize| {
            serde_json::json!({
                "title": format!("Espresso {}", n),
                "description": "Dark roast vibes",
                "colors": ["#3E2723", "#D7CCC8", "#FFB300"],
                "elements": ["headline", "cup illustration"],
                "layout": "centered",
                "textElements": [
                    {"text": "Fresh Brew", "fontSize": 48, "fontWeight": "bold", "color": "#3E2723"},
                    {"text": "Open daily", "fontSize": 24, "fontWeight": "normal", "color": "#5D4037"}
                ],
                "shapes": [
                    {"type": "circle", "color": "#FFB300", "width": 150, "height": 150}
                ]
            })
        };
        serde_json::json!({ "designs": [design(1), design(2), design(3)] }).to_string()
    }

    #[test]
    fn test_extract_json_prefers_labeled_fence() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nand also ```{\"b\": 2}```";
        assert_eq!(extract_json(text), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_any_fence() {
        let text = "```\n[1, 2]\n```";
        assert_eq!(extract_json(text), "[1, 2]");
    }

    #[test]
    fn test_extract_json_outer_braces() {
        let text = "Sure! {\"designs\": [{\"title\": \"x\"}]} Hope that helps {:)}";
        assert_eq!(extract_json(text), "{\"designs\": [{\"title\": \"x\"}]} Hope that helps {:)}");
        let text = "Sure! {\"designs\": []} done";
        assert_eq!(extract_json(text), "{\"designs\": []}");
    }

    #[test]
    fn test_extract_json_keeps_bare_arrays_whole() {
        let text = r#"[{"title": "A"}, {"title": "B"}]"#;
        assert_eq!(extract_json(text), text);
        let text = r#"Here: [{"title": "A"}, {"title": "B"}] enjoy"#;
        assert_eq!(extract_json(text), r#"[{"title": "A"}, {"title": "B"}]"#);
        assert_eq!(extract_json(r#"{"designs": []} [1]"#), r#"{"designs": []}"#);
    }

    #[test]
    fn test_extract_json_plain_text_passthrough() {
        assert_eq!(extract_json("  [1]  "), "[1]");
        assert_eq!(extract_json("Sorry, I cannot help with that."), "Sorry, I cannot help with that.");
    }

    #[test]
    fn test_fenced_block_yields_one_design_per_entry() {
        let raw = format!("```json\n{}\n```", three_designs_json());
        let designs = normalize(&raw, PROMPT);
        assert_eq!(designs.len(), 3);
        for (i, design) in designs.iter().enumerate() {
            assert_eq!(design.title, format!("Espresso {}", i + 1));
            assert!(!design.colors.is_empty());
            assert!(!design.text_elements.is_empty());
            assert!(!design.shapes.is_empty());
            assert_eq!(design.shapes[0].kind, ShapeKind::Circle);
        }
    }

    #[test]
    fn test_top_level_array_is_accepted() {
        let raw = r#"[{"title": "Solo"}]"#;
        let designs = parse_designs(raw, PROMPT).unwrap();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].title, "Solo");

        let raw = r##"[{"title": "Left", "colors": ["#111111"]}, {"title": "Right"}]"##;
        let designs = parse_designs(raw, PROMPT).unwrap();
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].title, "Left");
        assert_eq!(designs[0].colors, vec!["#111111"]);
        assert_eq!(designs[1].title, "Right");
    }

    #[test]
    fn test_refusal_falls_back_to_prompt_design() {
        let designs = normalize("Sorry, I cannot help with that.", PROMPT);
        assert_eq!(designs.len(), 1);
        let design = &designs[0];
        assert!(design.title.contains("modern poster for a coffee s"));
        assert!(design.title.ends_with("..."));
        assert_eq!(design.text_elements[0].text, PROMPT);
        assert_eq!(design.text_elements[1].text, "AI Generated Design");
        assert_eq!(design.colors, DEFAULT_PALETTE.to_vec());
        assert_eq!(design.shapes.len(), 1);
    }

    #[test]
    fn test_fallback_title_truncation() {
        assert_eq!(fallback_design("short").title, "Design for: short");
        let exact = "a".repeat(30);
        assert_eq!(fallback_design(&exact).title, format!("Design for: {}", exact));
        let long = "é".repeat(31);
        assert_eq!(
            fallback_design(&long).title,
            format!("Design for: {}...", "é".repeat(30))
        );
    }

    #[test]
    fn test_structural_failures_are_reported() {
        assert!(matches!(parse_designs("not json", PROMPT), Err(NormalizeError::Json(_))));
        assert!(matches!(
            parse_designs(r#"{"items": []}"#, PROMPT),
            Err(NormalizeError::MissingDesigns)
        ));
        assert!(matches!(
            parse_designs(r#"{"designs": "three"}"#, PROMPT),
            Err(NormalizeError::MissingDesigns)
        ));
        assert!(matches!(
            parse_designs(r#"{"designs": []}"#, PROMPT),
            Err(NormalizeError::EmptyDesigns)
        ));
        assert!(matches!(
            parse_designs(r#"{"designs": [{"title": "ok"}, null]}"#, PROMPT),
            Err(NormalizeError::InvalidEntry { index: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_entry_discards_partial_results() {
        let designs = normalize(r#"{"designs": [{"title": "ok"}, 42]}"#, PROMPT);
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].text_elements[0].text, PROMPT);
    }

    #[test]
    fn test_empty_colors_get_default_palette() {
        let raw = r#"{"designs": [{"title": "Bare", "colors": []}]}"#;
        let designs = normalize(raw, PROMPT);
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].colors, vec!["#6366F1", "#EC4899", "#F59E0B"]);
    }

    #[test]
    fn test_missing_fields_are_defaulted_by_index() {
        let raw = r#"{"designs": [{"title": "First"}, {}]}"#;
        let designs = normalize(raw, PROMPT);
        assert_eq!(designs.len(), 2);

        let second = &designs[1];
        assert_eq!(second.title, "Design 2");
        assert_eq!(second.description, DEFAULT_DESCRIPTION);
        assert_eq!(second.elements, DEFAULT_ELEMENTS.to_vec());
        assert_eq!(second.layout, DEFAULT_LAYOUT);
        assert_eq!(second.text_elements.len(), 2);
        assert_eq!(second.text_elements[0].text, format!("{} Title", PROMPT));
        assert_eq!(second.text_elements[0].color, "#000000");
        assert_eq!(second.text_elements[1].text, "Subtitle");
        assert_eq!(second.text_elements[1].color, "#666666");
        assert_eq!(second.shapes.len(), 1);
        assert_eq!(second.shapes[0].color, DEFAULT_SHAPE_COLOR);
        assert_eq!((second.shapes[0].width, second.shapes[0].height), (200, 100));
    }

    #[test]
    fn test_synthesized_elements_use_provided_colors() {
        let raw = r##"{"designs": [{"title": "Tinted", "description": "desc", "colors": ["#aa0000", "#00bb00", "#0000cc"]}]}"##;
        let design = &normalize(raw, PROMPT)[0];
        assert_eq!(design.text_elements[0].text, "Tinted");
        assert_eq!(design.text_elements[0].color, "#00bb00");
        assert_eq!(design.text_elements[1].text, "desc");
        assert_eq!(design.text_elements[1].color, "#0000cc");
        assert_eq!(design.shapes[0].color, "#aa0000");
    }

    #[test]
    fn test_broken_sub_entries_are_dropped_individually() {
        let raw = r##"{"designs": [{
            "textElements": [{"text": ""}, "loose", {"text": "Kept", "fontSize": -4, "fontWeight": "BOLD"}],
            "shapes": [{"type": "Hexagon", "width": 0, "height": 12.6}, 7]
        }]}"##;
        let design = &normalize(raw, PROMPT)[0];
        assert_eq!(design.text_elements.len(), 1);
        assert_eq!(design.text_elements[0].text, "Kept");
        assert_eq!(design.text_elements[0].font_size, DEFAULT_FONT_SIZE);
        assert_eq!(design.text_elements[0].font_weight, FontWeight::Bold);
        assert_eq!(design.text_elements[0].color, DEFAULT_TEXT_COLOR);

        assert_eq!(design.shapes.len(), 1);
        assert_eq!(design.shapes[0].kind, ShapeKind::Rectangle);
        assert_eq!(design.shapes[0].width, DEFAULT_SHAPE_SIZE);
        assert_eq!(design.shapes[0].height, 13);
    }

    #[test]
    fn test_wrong_shaped_fields_fall_back() {
        let raw = r#"{"designs": [{"title": 7, "colors": "red", "elements": {"a": 1}, "textElements": "none", "shapes": null}]}"#;
        let design = &normalize(raw, PROMPT)[0];
        assert_eq!(design.title, "Design 1");
        assert_eq!(design.colors, DEFAULT_PALETTE.to_vec());
        assert_eq!(design.elements, DEFAULT_ELEMENTS.to_vec());
        assert_eq!(design.text_elements.len(), 2);
        assert_eq!(design.shapes.len(), 1);
    }

    #[test]
    fn test_renormalizing_output_is_a_no_op() {
        let raw = r##"{"designs": [{"title": "One", "colors": ["#123456"]}, {}, {"shapes": [{"type": "TRIANGLE"}]}]}"##;
        let first = normalize(raw, PROMPT);

        let wrapped = serde_json::json!({ "designs": first }).to_string();
        assert_eq!(normalize(&wrapped, "something else"), first);

        let bare = serde_json::to_string(&first).unwrap();
        assert_eq!(normalize(&format!("```json\n{}\n```", bare), "other"), first);
        assert_eq!(normalize(&bare, "other"), first);
    }

    #[test]
    fn test_fallback_design_is_stable_under_renormalization() {
        let first = normalize("garbage", PROMPT);
        let again = normalize(&serde_json::to_string(&first).unwrap(), "unrelated");
        assert_eq!(again, first);
    }
}
