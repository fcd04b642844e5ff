//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use muse_core::apply::{ApplyOutcome, ApplyStep, CallOutcome};
use muse_core::design::DesignSuggestion;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CARD_WIDTH: usize = 72;

/// Print every suggestion as a numbered card.
pub fn print_suggestions(designs: &[DesignSuggestion]) {
    if designs.is_empty() {
        println!("{}", "No design suggestions.".dimmed());
        return;
    }

    println!("{}", "Design Suggestions:".bold());
    for (i, design) in designs.iter().enumerate() {
        println!();
        print_card(i + 1, design);
    }
}

fn print_card(number: usize, design: &DesignSuggestion) {
    println!(
        "{} {}",
        format!("[{}]", number).dimmed(),
        truncate_visual(&design.title, CARD_WIDTH - 5).cyan().bold()
    );
    println!("    {}", truncate_visual(&design.description, CARD_WIDTH - 4));

    let swatches: Vec<String> = design
        .colors
        .iter()
        .map(|c| format!("{} {}", swatch(c), c))
        .collect();
    println!("    {}: {}", "Colors".bold(), swatches.join("  "));
    println!(
        "    {}: {}",
        "Elements".bold(),
        truncate_visual(&design.elements.join(", "), CARD_WIDTH - 14)
    );
    println!("    {}: {}", "Layout".bold(), design.layout);

    println!("    {}", "Text Elements:".bold());
    for element in &design.text_elements {
        println!(
            "      \"{}\" ({}px, {})",
            truncate_visual(&element.text, CARD_WIDTH - 24),
            element.font_size,
            element.font_weight.as_str()
        );
    }

    let shapes: Vec<String> = design
        .shapes
        .iter()
        .map(|s| format!("{} {}x{} {}", s.kind.as_str(), s.width, s.height, s.color))
        .collect();
    println!("    {}: {}", "Shapes".bold(), shapes.join(", "));
}

/// Print the result of applying `design`, including any rejected calls.
pub fn print_outcome(outcome: &ApplyOutcome, design: &DesignSuggestion) {
    println!();
    match outcome {
        ApplyOutcome::Applied(report) => {
            println!("{}", outcome.notice(design).green());
            for call in &report.calls {
                if let CallOutcome::Rejected(reason) = &call.outcome {
                    println!("  {} {} skipped: {}", "!".yellow(), step_label(call.step), reason);
                }
            }
        }
        ApplyOutcome::AppliedWithFallback { .. } => println!("{}", outcome.notice(design).yellow()),
        ApplyOutcome::Failed { .. } => println!("{}", outcome.notice(design).red()),
    }
}

fn step_label(step: ApplyStep) -> String {
    match step {
        ApplyStep::Text(i) => format!("text element {}", i + 1),
        ApplyStep::Shape(i) => format!("shape {}", i + 1),
        ApplyStep::Background => "background".to_string(),
    }
}

/// A colored block for `#rrggbb` colors; a plain block otherwise.
fn swatch(color: &str) -> ColoredString {
    match parse_rgb(color) {
        Some((r, g, b)) => "██".truecolor(r, g, b),
        None => "██".normal(),
    }
}

fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Truncate to a display width, accounting for wide characters.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 3 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("#FF8000"), Some((255, 128, 0)));
        assert_eq!(parse_rgb("#fff"), None);
        assert_eq!(parse_rgb("red"), None);
    }

    #[test]
    fn test_truncate_visual_respects_wide_chars() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("abcdefghij", 6), "abc...");
        let wide = "咖啡咖啡咖啡";
        let cut = truncate_visual(wide, 7);
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 7);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_step_labels_are_one_based() {
        assert_eq!(step_label(ApplyStep::Text(0)), "text element 1");
        assert_eq!(step_label(ApplyStep::Background), "background");
    }
}
