//! FlowState - the persisted per-session aggregate

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::message::{ChatRole, Message};
use super::role_info::RoleInfo;

/// Everything a session remembers between turns
///
/// Owned exclusively by the flow controller for the duration of a turn and
/// persisted through the session store between turns. Optional fields keep
/// their presence/absence through serialization - a `None` never reloads as
/// an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowState {
    /// Stable opaque session identifier
    pub session_id: String,

    /// The current turn's raw input text
    pub user_message: String,

    /// Append-only conversation history, in insertion order
    pub message_history: Vec<Message>,

    /// Job details collected so far (monotonically filled)
    pub role_info: RoleInfo,

    /// The job posting artifact, absent until creation completes
    pub job_posting: Option<String>,

    /// Last refinement instruction (transient, per refinement turn)
    pub feedback: Option<String>,

    /// Last conversation reply (transient, per conversation turn)
    pub answer_message: Option<String>,
}

impl FlowState {
    /// Fresh state for a new session
    pub fn new(session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        debug!(%session_id, "FlowState::new: called");
        Self {
            session_id,
            ..Default::default()
        }
    }

    /// Append a user message to the history
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.message_history.push(Message::user(text));
    }

    /// Append an assistant message to the history
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.message_history.push(Message::assistant(text));
    }

    /// Has a posting been produced for this session?
    pub fn has_posting(&self) -> bool {
        self.job_posting.as_deref().map(|p| !p.is_empty()).unwrap_or(false)
    }

    /// Render the history as classifier context, oldest first
    pub fn history_as_text(&self) -> String {
        self.message_history
            .iter()
            .map(|m| {
                let who = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                };
                format!("{}: {}", who, m.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
