//! Panel session: owns the current suggestions and runs the two pipelines.

use tracing::{info, warn};
use uuid::Uuid;

use crate::apply::{self, ApplyOutcome, Clipboard, HostSurface};
use crate::design::{build_prompt, normalize, DesignSuggestion};
use crate::error::{MuseError, MuseResult};
use crate::generate::TextGenerator;
use crate::panel::{transition, PanelEvent, PanelState};

/// One panel session. `&mut self` on both pipelines keeps them exclusive.
pub struct Session<G> {
    generator: G,
    state: PanelState,
}

impl<G: TextGenerator> Session<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            state: PanelState::default(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn suggestions(&self) -> &[DesignSuggestion] {
        &self.state.suggestions
    }

    /// Generate a fresh set of suggestions for `prompt`.
    ///
    /// Malformed model output never fails here; only blank prompts and
    /// service failures do.
    pub async fn generate(&mut self, prompt: &str) -> MuseResult<&[DesignSuggestion]> {
        if prompt.trim().is_empty() {
            return Err(MuseError::validation("Describe the design you want before generating"));
        }

        let request_id = Uuid::new_v4();
        self.dispatch(PanelEvent::Submit(prompt.to_string()));
        info!(%request_id, prompt_len = prompt.len(), "Generating designs");

        let instruction = build_prompt(prompt);
        match self.generator.generate(&instruction).await {
            Ok(raw) => {
                let designs = normalize(&raw, prompt);
                info!(%request_id, count = designs.len(), "Designs ready");
                self.dispatch(PanelEvent::GenerationSucceeded(designs));
                Ok(&self.state.suggestions)
            }
            Err(e) => {
                warn!(%request_id, error = %e, "Generation failed");
                self.dispatch(PanelEvent::GenerationFailed(e.user_message()));
                Err(e.into())
            }
        }
    }

    /// Apply the suggestion at `index` to `host`.
    pub async fn apply(
        &mut self,
        index: usize,
        host: &mut dyn HostSurface,
        clipboard: Option<&mut dyn Clipboard>,
    ) -> MuseResult<ApplyOutcome> {
        let design = self
            .state
            .suggestions
            .get(index)
            .cloned()
            .ok_or(MuseError::SuggestionNotFound(index))?;

        self.dispatch(PanelEvent::ApplyRequested(index));
        let outcome = apply::apply(&design, host, clipboard).await;
        self.dispatch(PanelEvent::ApplyFinished(outcome.clone()));
        Ok(outcome)
    }

    fn dispatch(&mut self, event: PanelEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event);
    }
}
