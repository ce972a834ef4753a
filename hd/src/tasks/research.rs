//! Research tasks - the two independent producers in the creation pipeline

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::TaskError;
use crate::domain::RoleInfo;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::{PromptLoader, ResearchPromptContext};
use crate::search::SearchTool;

/// Which research task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchKind {
    MarketResearch,
    AiSkillsResearch,
}

impl ResearchKind {
    /// Template name for this task
    pub fn template_name(&self) -> &'static str {
        match self {
            ResearchKind::MarketResearch => "market-research",
            ResearchKind::AiSkillsResearch => "ai-skills-research",
        }
    }

    /// Search query for this task, built from the collected role fields
    fn query(&self, role_info: &RoleInfo) -> String {
        let job_role = role_info.job_role.as_deref().unwrap_or_default();
        let location = role_info.location.as_deref().unwrap_or_default();
        match self {
            ResearchKind::MarketResearch => {
                format!("{} salary range benefits {}", job_role, location)
            }
            ResearchKind::AiSkillsResearch => {
                format!("AI tools skills for {} 2025", job_role)
            }
        }
    }
}

impl std::fmt::Display for ResearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResearchKind::MarketResearch => write!(f, "market_research"),
            ResearchKind::AiSkillsResearch => write!(f, "ai_skills_research"),
        }
    }
}

/// Run one research task: search, then summarize with the LLM
///
/// Pure function of `role_info` to text; holds no state and touches none.
pub async fn run_research(
    kind: ResearchKind,
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchTool>,
    prompts: Arc<PromptLoader>,
    role_info: RoleInfo,
    max_tokens: u32,
) -> Result<String, TaskError> {
    debug!(%kind, "run_research: called");

    let query = kind.query(&role_info);
    let hits = search.search(&query).await?;
    debug!(%kind, hit_count = hits.len(), "run_research: search complete");

    let prompt = prompts
        .render(kind.template_name(), &ResearchPromptContext::new(&role_info, &hits))
        .map_err(|e| TaskError::Template(e.to_string()))?;

    let request = CompletionRequest::text(prompt, "Produce the research summary now.", max_tokens);
    let response = llm.complete(request).await?;

    info!(%kind, output_len = response.content.len(), "Research task complete");
    Ok(response.content)
}
