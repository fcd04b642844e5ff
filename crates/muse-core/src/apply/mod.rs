//! Application engine.
//!
//! Replays a `DesignSuggestion` onto a host surface as an ordered sequence of
//! element-creation calls: text elements, then shapes, then one background.
//! Calls are awaited one at a time so stacking position and z-order follow the
//! design's own ordering.
//!
//! Failures come in two tiers. A single rejected element is recorded in the
//! call ledger and the sequence moves on. A surface that becomes unreachable
//! ends the sequence; the design is then offered to the clipboard as text so
//! the user does not lose it.

pub mod host;
pub mod path;

pub use host::{Clipboard, ClipboardError, HostError, HostSurface, ShapeRequest, TextRequest, ViewBox};

use tracing::{debug, info, warn};

use crate::design::{DesignSuggestion, ShapeSpec, TextElement};

pub const TEXT_LEFT: u32 = 50;
pub const TEXT_TOP: u32 = 50;
pub const TEXT_SPACING: u32 = 100;

pub const SHAPE_LEFT: u32 = 350;
pub const SHAPE_TOP: u32 = 50;
pub const SHAPE_SPACING: u32 = 120;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 600;

/// Alpha suffix appended to the background tint.
pub const BACKGROUND_ALPHA: &str = "40";

/// One host call in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    Text(usize),
    Shape(usize),
    Background,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Applied,
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub step: ApplyStep,
    pub outcome: CallOutcome,
}

/// Ledger of a sequence that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyReport {
    pub calls: Vec<CallRecord>,
}

impl ApplyReport {
    pub fn text_applied(&self) -> usize {
        self.count_applied(|step| matches!(step, ApplyStep::Text(_)))
    }

    pub fn shapes_applied(&self) -> usize {
        self.count_applied(|step| matches!(step, ApplyStep::Shape(_)))
    }

    pub fn background_applied(&self) -> bool {
        self.count_applied(|step| step == ApplyStep::Background) > 0
    }

    /// Steps the host rejected, in call order.
    pub fn failed_steps(&self) -> Vec<ApplyStep> {
        self.calls
            .iter()
            .filter(|c| matches!(c.outcome, CallOutcome::Rejected(_)))
            .map(|c| c.step)
            .collect()
    }

    fn count_applied(&self, pred: impl Fn(ApplyStep) -> bool) -> usize {
        self.calls
            .iter()
            .filter(|c| c.outcome == CallOutcome::Applied && pred(c.step))
            .count()
    }
}

/// Why the whole sequence was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineFailure {
    PermissionDenied(String),
    Network(String),
    Other(String),
}

impl PipelineFailure {
    /// Classify a surface failure by its message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("permission") {
            Self::PermissionDenied(message.to_string())
        } else if lower.contains("network") {
            Self::Network(message.to_string())
        } else {
            Self::Other(message.to_string())
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied(_) => {
                "Permission denied. Make sure the app has access to modify the design.".to_string()
            }
            Self::Network(_) => "Network error. Please check your connection and try again.".to_string(),
            Self::Other(message) => format!("Error: {}", message),
        }
    }
}

/// Final result of applying one design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(ApplyReport),
    /// The canvas was lost; the design summary went to the clipboard.
    AppliedWithFallback { reason: PipelineFailure, summary: String },
    /// The canvas was lost and the clipboard could not take the summary either.
    Failed { reason: PipelineFailure, notice: String },
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Pipeline failure behind a non-`Applied` outcome.
    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            Self::Applied(_) => None,
            Self::AppliedWithFallback { reason, .. } | Self::Failed { reason, .. } => Some(reason),
        }
    }

    /// Message presented to the user once applying ends.
    pub fn notice(&self, design: &DesignSuggestion) -> String {
        match self {
            Self::Applied(report) => {
                let mut lines = vec![
                    format!("✅ Design \"{}\" has been applied to your canvas!", design.title),
                    String::new(),
                    "🎨 Added elements:".to_string(),
                    format!("• {} text elements", report.text_applied()),
                    format!("• {} shapes", report.shapes_applied()),
                ];
                if report.background_applied() {
                    lines.push("• Background color".to_string());
                }
                lines.push(String::new());
                lines.push("💡 You can now customize and adjust the elements as needed.".to_string());
                lines.join("\n")
            }
            Self::AppliedWithFallback { reason, .. } => format!(
                "❌ Could not apply design automatically.\n\n📋 Design details copied to clipboard as fallback.\n\nError: {}",
                reason.user_message()
            ),
            Self::Failed { notice, .. } => notice.clone(),
        }
    }
}

/// Apply `design` to `host`, falling back to `clipboard` if the host is lost.
pub async fn apply(
    design: &DesignSuggestion,
    host: &mut dyn HostSurface,
    clipboard: Option<&mut dyn Clipboard>,
) -> ApplyOutcome {
    match run_sequence(design, host).await {
        Ok(report) => {
            info!(
                title = %design.title,
                calls = report.calls.len(),
                failed = report.failed_steps().len(),
                "Design applied"
            );
            ApplyOutcome::Applied(report)
        }
        Err(message) => {
            let reason = PipelineFailure::classify(&message);
            warn!(title = %design.title, error = %message, "Applying design failed, trying clipboard");
            clipboard_fallback(design, reason, clipboard).await
        }
    }
}

/// Issue every host call in order. Only an unreachable surface escapes.
async fn run_sequence(design: &DesignSuggestion, host: &mut dyn HostSurface) -> Result<ApplyReport, String> {
    let mut report = ApplyReport {
        calls: Vec::with_capacity(design.text_elements.len() + design.shapes.len() + 1),
    };

    for (index, element) in design.text_elements.iter().enumerate() {
        let result = host.add_text(text_request(element, index)).await;
        record(&mut report, ApplyStep::Text(index), result)?;
    }

    for (index, shape) in design.shapes.iter().enumerate() {
        let result = host.add_shape(shape_request(shape, index)).await;
        record(&mut report, ApplyStep::Shape(index), result)?;
    }

    if let Some(color) = design.primary_color() {
        let result = host.add_shape(background_request(color)).await;
        record(&mut report, ApplyStep::Background, result)?;
    }

    Ok(report)
}

fn record(report: &mut ApplyReport, step: ApplyStep, result: Result<(), HostError>) -> Result<(), String> {
    let outcome = match result {
        Ok(()) => {
            debug!(?step, "Host call applied");
            CallOutcome::Applied
        }
        Err(HostError::Rejected(message)) => {
            warn!(?step, error = %message, "Host rejected element, continuing");
            CallOutcome::Rejected(message)
        }
        Err(HostError::Unavailable(message)) => return Err(message),
    };
    report.calls.push(CallRecord { step, outcome });
    Ok(())
}

async fn clipboard_fallback(
    design: &DesignSuggestion,
    reason: PipelineFailure,
    clipboard: Option<&mut dyn Clipboard>,
) -> ApplyOutcome {
    let manual_notice = || {
        format!(
            "❌ Could not apply design automatically.\n\nError: {}\n\nPlease apply the design elements manually.",
            reason.user_message()
        )
    };

    let Some(clipboard) = clipboard.filter(|c| c.is_available()) else {
        debug!("No clipboard available for fallback");
        return ApplyOutcome::Failed {
            notice: manual_notice(),
            reason,
        };
    };

    let summary = design.clipboard_summary();
    match clipboard.write_text(&summary).await {
        Ok(()) => {
            info!(title = %design.title, "Design summary copied to clipboard");
            ApplyOutcome::AppliedWithFallback { reason, summary }
        }
        Err(e) => {
            warn!(error = %e, "Clipboard fallback failed");
            ApplyOutcome::Failed {
                notice: manual_notice(),
                reason,
            }
        }
    }
}

pub fn text_request(element: &TextElement, index: usize) -> TextRequest {
    TextRequest {
        text: element.text.clone(),
        font_size: element.font_size,
        font_weight: element.font_weight.clone(),
        color: element.color.clone(),
        top: TEXT_TOP + TEXT_SPACING * index as u32,
        left: TEXT_LEFT,
    }
}

pub fn shape_request(shape: &ShapeSpec, index: usize) -> ShapeRequest {
    ShapeRequest {
        path_data: path::shape_path(shape.kind, shape.width, shape.height),
        fill_color: shape.color.clone(),
        view_box: ViewBox {
            width: shape.width,
            height: shape.height,
            top: 0,
            left: 0,
        },
        top: SHAPE_TOP + SHAPE_SPACING * index as u32,
        left: SHAPE_LEFT,
        width: shape.width,
        height: shape.height,
    }
}

/// Full-canvas tint drawn after everything else.
pub fn background_request(color: &str) -> ShapeRequest {
    ShapeRequest {
        path_data: path::rectangle_path(CANVAS_WIDTH, CANVAS_HEIGHT),
        fill_color: format!("{}{}", color, BACKGROUND_ALPHA),
        view_box: ViewBox {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            top: 0,
            left: 0,
        },
        top: 0,
        left: 0,
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    }
}
