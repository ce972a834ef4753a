//! Refinement handler
//!
//! Revises an existing posting against the user's feedback, grounded in a
//! fresh search. Runs entirely on local copies: the session's stored posting
//! is only replaced by the controller after this returns successfully.

use std::sync::Arc;

use tracing::{debug, info};

use super::FlowError;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, RefinePromptContext};
use crate::search::SearchTool;

/// Applies feedback-driven revisions to a finished posting
pub struct RefinementHandler {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchTool>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl RefinementHandler {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchTool>,
        prompts: Arc<PromptLoader>,
        max_tokens: u32,
    ) -> Self {
        Self { llm, search, prompts, max_tokens }
    }

    /// Produce the revised posting text
    ///
    /// The router guard guarantees a posting exists before this runs. Any
    /// failure leaves the caller's posting as it was.
    pub async fn run(&self, posting: &str, feedback: &str) -> Result<String, FlowError> {
        debug!(feedback_len = feedback.len(), "RefinementHandler::run: called");

        let query = format!("job posting {}", feedback);
        let hits = self
            .search
            .search(&query)
            .await
            .map_err(|e| FlowError::Refinement(e.to_string()))?;
        debug!(hit_count = hits.len(), "RefinementHandler::run: search complete");

        let prompt = self
            .prompts
            .render("refine-posting", &RefinePromptContext::new(posting, feedback, &hits))
            .map_err(|e| FlowError::Refinement(e.to_string()))?;

        let request =
            CompletionRequest::text(prompt, "Apply the feedback and return the full revised posting.", self.max_tokens);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|e| FlowError::Refinement(e.to_string()))?;

        info!(revised_len = response.content.len(), "Refinement complete");
        Ok(response.content)
    }
}
