//! Panel state machine.
//!
//! `transition` is a pure function from the current state and an event to the
//! next state. It knows nothing about the pipelines it gates; `Session` feeds
//! it events as generation and application start and finish.

use crate::apply::ApplyOutcome;
use crate::design::DesignSuggestion;

/// Which pipeline, if any, is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
    Applying { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub phase: Phase,
    pub visible: bool,
    /// Replaced wholesale on each generation, never edited in place.
    pub suggestions: Vec<DesignSuggestion>,
    pub error: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            visible: true,
            suggestions: Vec::new(),
            error: None,
        }
    }
}

impl PanelState {
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether a submit of `prompt` would start a generation.
    pub fn can_submit(&self, prompt: &str) -> bool {
        !self.is_busy() && !prompt.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Submit(String),
    GenerationSucceeded(Vec<DesignSuggestion>),
    GenerationFailed(String),
    ApplyRequested(usize),
    ApplyFinished(ApplyOutcome),
    Hide,
    Show,
}

/// Compute the next panel state. Events that make no sense in the current
/// phase leave the state unchanged.
pub fn transition(state: PanelState, event: PanelEvent) -> PanelState {
    match (state.phase, event) {
        (Phase::Idle, PanelEvent::Submit(prompt)) if !prompt.trim().is_empty() => PanelState {
            phase: Phase::Generating,
            suggestions: Vec::new(),
            error: None,
            ..state
        },
        (Phase::Generating, PanelEvent::GenerationSucceeded(suggestions)) => PanelState {
            phase: Phase::Idle,
            suggestions,
            ..state
        },
        (Phase::Generating, PanelEvent::GenerationFailed(message)) => PanelState {
            phase: Phase::Idle,
            error: Some(message),
            ..state
        },
        (Phase::Idle, PanelEvent::ApplyRequested(index)) if index < state.suggestions.len() => PanelState {
            phase: Phase::Applying { index },
            error: None,
            ..state
        },
        (Phase::Applying { .. }, PanelEvent::ApplyFinished(outcome)) => PanelState {
            phase: Phase::Idle,
            error: outcome.failure().map(|reason| reason.user_message()),
            ..state
        },
        (Phase::Idle, PanelEvent::Hide) => PanelState {
            visible: false,
            ..state
        },
        (Phase::Idle, PanelEvent::Show) => PanelState {
            visible: true,
            ..state
        },
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{ApplyReport, PipelineFailure};
    use crate::design::normalize::fallback_design;

    fn with_suggestions(n: usize) -> PanelState {
        PanelState {
            suggestions: (0..n).map(|i| fallback_design(&format!("idea {}", i))).collect(),
            ..PanelState::default()
        }
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let state = transition(PanelState::default(), PanelEvent::Submit("   ".to_string()));
        assert_eq!(state, PanelState::default());
        assert!(!state.can_submit(" \n"));
        assert!(state.can_submit("poster"));
    }

    #[test]
    fn test_submit_clears_previous_results() {
        let mut state = with_suggestions(2);
        state.error = Some("old".to_string());
        let state = transition(state, PanelEvent::Submit("poster".to_string()));
        assert_eq!(state.phase, Phase::Generating);
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
        assert!(!state.can_submit("another"));
    }

    #[test]
    fn test_generation_round_trip() {
        let state = transition(PanelState::default(), PanelEvent::Submit("poster".to_string()));
        let designs = vec![fallback_design("poster")];
        let state = transition(state, PanelEvent::GenerationSucceeded(designs.clone()));
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.suggestions, designs);

        let state = transition(state, PanelEvent::Submit("again".to_string()));
        let state = transition(state, PanelEvent::GenerationFailed("Request timed out.".to_string()));
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.error.as_deref(), Some("Request timed out."));
    }

    #[test]
    fn test_submit_while_generating_is_ignored() {
        let state = transition(PanelState::default(), PanelEvent::Submit("one".to_string()));
        let again = transition(state.clone(), PanelEvent::Submit("two".to_string()));
        assert_eq!(again, state);
    }

    #[test]
    fn test_apply_requires_idle_and_valid_index() {
        let state = with_suggestions(2);
        assert_eq!(transition(state.clone(), PanelEvent::ApplyRequested(2)), state);

        let applying = transition(state, PanelEvent::ApplyRequested(1));
        assert_eq!(applying.phase, Phase::Applying { index: 1 });
        assert_eq!(
            transition(applying.clone(), PanelEvent::Submit("new".to_string())),
            applying
        );
        assert_eq!(transition(applying.clone(), PanelEvent::Hide), applying);
    }

    #[test]
    fn test_apply_finished_records_failures() {
        let applying = transition(with_suggestions(1), PanelEvent::ApplyRequested(0));
        let done = transition(
            applying.clone(),
            PanelEvent::ApplyFinished(ApplyOutcome::Applied(ApplyReport::default())),
        );
        assert_eq!(done.phase, Phase::Idle);
        assert!(done.error.is_none());
        assert_eq!(done.suggestions.len(), 1);

        let failed = transition(
            applying,
            PanelEvent::ApplyFinished(ApplyOutcome::Failed {
                reason: PipelineFailure::Network("down".to_string()),
                notice: String::new(),
            }),
        );
        assert_eq!(
            failed.error.as_deref(),
            Some("Network error. Please check your connection and try again.")
        );
    }

    #[test]
    fn test_hide_and_show() {
        let hidden = transition(PanelState::default(), PanelEvent::Hide);
        assert!(!hidden.visible);
        assert!(transition(hidden, PanelEvent::Show).visible);
    }
}
