//! Conversation handler
//!
//! The cheapest path: the router already produced a conversational reply as
//! part of classification, so this handler just validates it and falls back
//! to a deterministic follow-up question when the backend gave none.

use tracing::debug;

use crate::domain::{FlowState, RoleField};

/// Produces the reply for conversation-intent turns
pub struct ConversationHandler;

impl ConversationHandler {
    /// Build the reply text for this turn
    ///
    /// Uses the classifier's `answer_message` verbatim when present; otherwise
    /// asks for the missing fields (or offers next steps when nothing is
    /// missing). Never calls the backend.
    pub fn reply(state: &FlowState, missing_fields: &[RoleField]) -> String {
        debug!(
            session_id = %state.session_id,
            missing = missing_fields.len(),
            "ConversationHandler::reply: called"
        );

        if let Some(answer) = state.answer_message.as_deref() {
            if !answer.trim().is_empty() {
                return answer.to_string();
            }
        }

        Self::fallback(state, missing_fields)
    }

    fn fallback(state: &FlowState, missing_fields: &[RoleField]) -> String {
        if missing_fields.is_empty() {
            if state.has_posting() {
                return "Your job posting is ready. Tell me what you'd like changed, or ask me to create another one.".to_string();
            }
            return "I have the job role, location, and company name. Say the word and I'll create the posting.".to_string();
        }

        let known: Vec<String> = RoleField::ALL
            .iter()
            .filter(|f| !missing_fields.contains(f))
            .map(|f| f.name().to_string())
            .collect();
        let wanted: Vec<String> = missing_fields.iter().map(|f| f.name().to_string()).collect();

        if known.is_empty() {
            format!(
                "I can help you create a job posting. To get started, please tell me the {}.",
                join_list(&wanted)
            )
        } else {
            format!(
                "Thanks - I have the {}. Could you also tell me the {}?",
                join_list(&known),
                join_list(&wanted)
            )
        }
    }
}

fn join_list(items: &[String]) -> String {
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        2 => format!("{} and {}", items[0], items[1]),
        _ => format!(
            "{}, and {}",
            items[..items.len() - 1].join(", "),
            items[items.len() - 1]
        ),
    }
}
