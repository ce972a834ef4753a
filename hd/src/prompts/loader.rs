//! Prompt loader
//!
//! Loads prompt templates from a user override directory or falls back to the
//! embedded defaults, and renders them with typed contexts. Templates are
//! loaded once at startup and immutable during a run.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::domain::{FlowState, RoleInfo};
use crate::search::{SearchHit, hits_as_text};

const NOT_COLLECTED: &str = "Not yet collected";

fn field_or_placeholder(field: &Option<String>) -> String {
    field
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NOT_COLLECTED)
        .to_string()
}

/// Context for rendering the router classification prompt
#[derive(Debug, Clone, Serialize)]
pub struct RouterPromptContext {
    pub job_role: String,
    pub location: String,
    pub company_name: String,
    pub posting_status: String,
    pub user_message: String,
    pub history: String,
}

impl RouterPromptContext {
    /// Build the router context from session state
    pub fn from_state(state: &FlowState) -> Self {
        debug!(session_id = %state.session_id, "RouterPromptContext::from_state: called");
        Self {
            job_role: field_or_placeholder(&state.role_info.job_role),
            location: field_or_placeholder(&state.role_info.location),
            company_name: field_or_placeholder(&state.role_info.company_name),
            posting_status: if state.has_posting() {
                "Yes - a posting has already been generated".to_string()
            } else {
                "No posting yet".to_string()
            },
            user_message: state.user_message.clone(),
            history: state.history_as_text(),
        }
    }
}

/// Context for rendering the two research prompts
#[derive(Debug, Clone, Serialize)]
pub struct ResearchPromptContext {
    pub job_role: String,
    pub location: String,
    pub company_name: String,
    pub search_results: String,
}

impl ResearchPromptContext {
    pub fn new(role_info: &RoleInfo, hits: &[SearchHit]) -> Self {
        Self {
            job_role: field_or_placeholder(&role_info.job_role),
            location: field_or_placeholder(&role_info.location),
            company_name: field_or_placeholder(&role_info.company_name),
            search_results: hits_as_text(hits),
        }
    }
}

/// Context for rendering the posting synthesis prompt
#[derive(Debug, Clone, Serialize)]
pub struct WritePromptContext {
    pub job_role: String,
    pub location: String,
    pub company_name: String,
    pub market_research: String,
    pub ai_skills_research: String,
}

impl WritePromptContext {
    pub fn new(role_info: &RoleInfo, market_research: String, ai_skills_research: String) -> Self {
        Self {
            job_role: field_or_placeholder(&role_info.job_role),
            location: field_or_placeholder(&role_info.location),
            company_name: field_or_placeholder(&role_info.company_name),
            market_research,
            ai_skills_research,
        }
    }
}

/// Context for rendering the refinement prompt
#[derive(Debug, Clone, Serialize)]
pub struct RefinePromptContext {
    pub job_posting: String,
    pub feedback: String,
    pub search_results: String,
}

impl RefinePromptContext {
    pub fn new(job_posting: &str, feedback: &str, hits: &[SearchHit]) -> Self {
        Self {
            job_posting: job_posting.to_string(),
            feedback: feedback.to_string(),
            search_results: hits_as_text(hits),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.hiredaemon/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    ///
    /// User overrides live in `{root}/.hiredaemon/prompts/{name}.pmt`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, "PromptLoader::new: called");
        let user_dir = root.join(".hiredaemon/prompts");
        let user_dir_exists = user_dir.exists();
        debug!(?user_dir, %user_dir_exists, "PromptLoader::new: checking override directory");

        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);

        Self {
            hbs,
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs, user_dir: None }
    }

    /// Load a template by name
    ///
    /// Checks the user override directory first, then the embedded fallback.
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found user override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: using embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}
