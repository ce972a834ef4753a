//! Posting writer - the consumer task behind the research join

use std::sync::Arc;

use tracing::{debug, info};

use super::TaskError;
use crate::domain::RoleInfo;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, WritePromptContext};

/// Synthesize the job posting from both research outputs
///
/// Strictly ordered after the research join: callers must only invoke this
/// with two complete research results, never with a partial pair.
pub async fn write_posting(
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    role_info: &RoleInfo,
    market_research: String,
    ai_skills_research: String,
    max_tokens: u32,
) -> Result<String, TaskError> {
    debug!(
        market_len = market_research.len(),
        skills_len = ai_skills_research.len(),
        "write_posting: called"
    );

    let context = WritePromptContext::new(role_info, market_research, ai_skills_research);
    let prompt = prompts
        .render("write-posting", &context)
        .map_err(|e| TaskError::Template(e.to_string()))?;

    let request = CompletionRequest::text(prompt, "Write the job posting now.", max_tokens);
    let response = llm.complete(request).await?;

    info!(posting_len = response.content.len(), "Posting synthesis complete");
    Ok(response.content)
}
