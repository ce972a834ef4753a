//! Flow error taxonomy
//!
//! Every component failure bubbles to the controller as one of these typed
//! variants. Backend errors (`LlmError`, `ToolError`) are wrapped here and
//! never surfaced raw; `user_message` maps each variant to a generic
//! retry-able message without exposing backend internals. All variants are
//! recoverable at the turn level - none corrupts persisted state.

use thiserror::Error;

use crate::tasks::ResearchKind;

/// Errors from one conversation turn
#[derive(Debug, Error)]
pub enum FlowError {
    /// Router/backend failure - only the history append is persisted
    #[error("Intent classification failed: {0}")]
    Classification(String),

    /// A research task failed - the whole creation attempt is abandoned
    #[error("Research task {which} failed: {detail}")]
    Research { which: ResearchKind, detail: String },

    /// The writer failed after a successful research join
    #[error("Posting synthesis failed: {0}")]
    Synthesis(String),

    /// Refinement failed - the existing posting is untouched
    #[error("Posting refinement failed: {0}")]
    Refinement(String),

    /// Save/load failure - the turn result is not durable
    #[error("Storage error: {0}")]
    Storage(#[from] sessionstore::StoreError),

    /// The enclosing turn was cancelled mid-flight
    #[error("Turn cancelled")]
    Cancelled,
}

impl FlowError {
    /// Generic user-visible message for this failure
    ///
    /// Deliberately vague: backend internals stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            FlowError::Classification(_) => "I couldn't process that message. Please try again.",
            FlowError::Research { .. } | FlowError::Synthesis(_) => {
                "I couldn't finish creating the posting. Please try again."
            }
            FlowError::Refinement(_) => "I couldn't apply that change. The current posting is unchanged.",
            FlowError::Storage(_) => "I couldn't save this conversation. Please retry your message.",
            FlowError::Cancelled => "That request was cancelled.",
        }
    }
}
