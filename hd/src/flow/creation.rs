//! Job creation orchestrator - parallel research fan-out with a barrier join
//!
//! Spawns the two research tasks concurrently, waits for BOTH to finish, and
//! only then runs the writer with the complete pair of results. Any failure
//! abandons the whole attempt; the session's existing posting (if any) is
//! never touched from here.

use std::sync::Arc;

use tokio::task::{AbortHandle, JoinError};
use tracing::{debug, info, warn};

use super::FlowError;
use crate::domain::RoleInfo;
use crate::llm::LlmClient;
use crate::prompts::PromptLoader;
use crate::search::SearchTool;
use crate::tasks::{ResearchKind, TaskError, run_research, write_posting};

/// Aborts spawned research tasks unless explicitly disarmed
///
/// Held across the barrier join so that cancelling the enclosing turn (drop
/// of its future) also cancels the in-flight research tasks instead of
/// leaking them onto the runtime.
struct AbortGuard {
    handles: Vec<AbortHandle>,
    armed: bool,
}

impl AbortGuard {
    fn new(handles: Vec<AbortHandle>) -> Self {
        Self { handles, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!(task_count = self.handles.len(), "AbortGuard: aborting in-flight research tasks");
            for handle in &self.handles {
                handle.abort();
            }
        }
    }
}

/// Runs the research fan-out and the posting writer
pub struct JobCreationOrchestrator {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchTool>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl JobCreationOrchestrator {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchTool>,
        prompts: Arc<PromptLoader>,
        max_tokens: u32,
    ) -> Self {
        Self { llm, search, prompts, max_tokens }
    }

    /// Run the full creation pipeline and return the finished posting
    ///
    /// Callers must only invoke this with a complete `role_info`; the router
    /// guard guarantees that. The barrier waits for both research tasks even
    /// when one has already failed, so a failure report always reflects the
    /// final outcome of both.
    pub async fn run(&self, role_info: &RoleInfo) -> Result<String, FlowError> {
        debug!(?role_info, "JobCreationOrchestrator::run: called");

        let market = tokio::spawn(run_research(
            ResearchKind::MarketResearch,
            self.llm.clone(),
            self.search.clone(),
            self.prompts.clone(),
            role_info.clone(),
            self.max_tokens,
        ));
        let skills = tokio::spawn(run_research(
            ResearchKind::AiSkillsResearch,
            self.llm.clone(),
            self.search.clone(),
            self.prompts.clone(),
            role_info.clone(),
            self.max_tokens,
        ));
        let guard = AbortGuard::new(vec![market.abort_handle(), skills.abort_handle()]);

        // Barrier: both tasks complete before anything downstream runs
        let (market_out, skills_out) = tokio::join!(market, skills);
        guard.disarm();

        let market_research = unwrap_research(ResearchKind::MarketResearch, market_out)?;
        let ai_skills_research = unwrap_research(ResearchKind::AiSkillsResearch, skills_out)?;
        debug!("JobCreationOrchestrator::run: research join complete");

        let posting = write_posting(
            self.llm.clone(),
            self.prompts.clone(),
            role_info,
            market_research,
            ai_skills_research,
            self.max_tokens,
        )
        .await
        .map_err(|e| FlowError::Synthesis(e.to_string()))?;

        info!(posting_len = posting.len(), "Job creation pipeline complete");
        Ok(posting)
    }
}

fn unwrap_research(
    kind: ResearchKind,
    joined: Result<Result<String, TaskError>, JoinError>,
) -> Result<String, FlowError> {
    match joined {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(FlowError::Research { which: kind, detail: e.to_string() }),
        Err(join_err) if join_err.is_cancelled() => Err(FlowError::Cancelled),
        Err(join_err) => Err(FlowError::Research {
            which: kind,
            detail: TaskError::Panicked(join_err.to_string()).to_string(),
        }),
    }
}
