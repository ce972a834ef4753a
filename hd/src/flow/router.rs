//! Intent router
//!
//! Classifies each user message into one of the three execution paths and
//! validates the classifier's claim before anything acts on it. The backend
//! may claim any intent it likes; the downgrade guards here are what decide
//! whether the claim holds against actual session state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::FlowError;
use crate::domain::{FlowState, Intent, IntentKind, RawIntent, RouterOutput};
use crate::llm::{self, CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, RouterPromptContext};

/// Classifies user messages and enforces the downgrade guards
pub struct Router {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl Router {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self { llm, prompts, max_tokens }
    }

    /// Classify the current turn's message and return the validated intent
    ///
    /// Side effects on `state`: extracted role fields are merged in and the
    /// transient `feedback` / `answer_message` fields are set from the
    /// classifier output. Merging happens regardless of which intent wins -
    /// partial details mentioned in a chatty message are never dropped.
    pub async fn classify(&self, state: &mut FlowState) -> Result<Intent, FlowError> {
        debug!(session_id = %state.session_id, "Router::classify: called");

        let prompt = self
            .prompts
            .render("router", &RouterPromptContext::from_state(state))
            .map_err(|e| FlowError::Classification(e.to_string()))?;

        let request = CompletionRequest::text(prompt, state.user_message.clone(), self.max_tokens);
        let output: RouterOutput = llm::infer(&self.llm, request)
            .await
            .map_err(|e| FlowError::Classification(e.to_string()))?;

        debug!(
            raw_intent = ?output.user_intent,
            reasoning = %output.reasoning,
            "Router::classify: raw classification"
        );

        Ok(Self::apply(output, state))
    }

    /// Merge classifier output into state and run the downgrade guards
    ///
    /// Pure with respect to the backend: everything here is a function of the
    /// raw output and the session state.
    fn apply(output: RouterOutput, state: &mut FlowState) -> Intent {
        if let Some(ref extracted) = output.role_info {
            state.role_info.merge(extracted);
        }
        state.feedback = output.feedback.clone().filter(|f| !f.trim().is_empty());
        state.answer_message = output.answer_message.clone().filter(|a| !a.trim().is_empty());

        let kind = match output.user_intent {
            RawIntent::JobCreation => {
                if state.role_info.is_complete() {
                    IntentKind::JobCreation {
                        role_info: state.role_info.clone(),
                    }
                } else {
                    // Guard: creation is never dispatched on partial details
                    let missing = state.role_info.missing_fields();
                    warn!(
                        ?missing,
                        "Router: downgrading job_creation, required fields missing"
                    );
                    IntentKind::Conversation { missing_fields: missing }
                }
            }
            RawIntent::Refinement => {
                if state.has_posting() {
                    // A refinement without explicit feedback uses the raw
                    // message as the instruction
                    let feedback = state
                        .feedback
                        .clone()
                        .unwrap_or_else(|| state.user_message.clone());
                    IntentKind::Refinement { feedback }
                } else {
                    warn!("Router: downgrading refinement, no posting exists");
                    IntentKind::Conversation {
                        missing_fields: state.role_info.missing_fields(),
                    }
                }
            }
            RawIntent::Conversation => IntentKind::Conversation {
                missing_fields: state.role_info.missing_fields(),
            },
        };

        let intent = Intent {
            kind,
            reasoning: output.reasoning,
        };
        info!(
            session_id = %state.session_id,
            intent = intent.kind_name(),
            "Router: intent resolved"
        );
        intent
    }
}
