//! Leaf tasks for the job creation pipeline
//!
//! Each task is a pure async function of `RoleInfo` (plus prior task outputs
//! for the writer) to text. Tasks own their prompt rendering and their calls
//! to the search tool and the LLM; they share no mutable state, which is what
//! makes running the research pair in parallel safe.

mod research;
mod writer;

use thiserror::Error;

pub use research::{ResearchKind, run_research};
pub use writer::write_posting;

use crate::llm::LlmError;
use crate::search::ToolError;

/// Errors from a single task
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("inference call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("search tool failed: {0}")]
    Tool(#[from] ToolError),

    #[error("prompt template error: {0}")]
    Template(String),

    #[error("task panicked: {0}")]
    Panicked(String),
}
