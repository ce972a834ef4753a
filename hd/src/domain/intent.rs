//! Intent types - the raw classifier output and the validated effective intent
//!
//! The classifier's answer is untrusted input. `RouterOutput` is exactly what
//! the inference backend returns; `Intent` is what the router hands to the
//! controller after the downgrade guards have run. Only `Intent` drives state
//! transitions.

use serde::{Deserialize, Serialize};

use super::role_info::{RoleField, RoleInfo};

/// Intent as claimed by the inference backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawIntent {
    JobCreation,
    Conversation,
    Refinement,
}

/// Structured classifier output
///
/// Schema enforced at deserialization: a missing `user_intent` or `reasoning`
/// is a schema violation, everything else is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterOutput {
    pub user_intent: RawIntent,
    #[serde(default)]
    pub role_info: Option<RoleInfo>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub answer_message: Option<String>,
    pub reasoning: String,
}

/// Validated effective intent for one turn
#[derive(Debug, Clone)]
pub struct Intent {
    pub kind: IntentKind,
    /// Classifier's stated reasoning, kept for observability
    pub reasoning: String,
}

/// The three execution paths
#[derive(Debug, Clone)]
pub enum IntentKind {
    /// Keep talking: ask for whatever is still missing
    Conversation { missing_fields: Vec<RoleField> },
    /// All prerequisites met: run the creation pipeline
    JobCreation { role_info: RoleInfo },
    /// An artifact exists and the user wants it changed
    Refinement { feedback: String },
}

impl Intent {
    /// Short name for logs
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            IntentKind::Conversation { .. } => "conversation",
            IntentKind::JobCreation { .. } => "job_creation",
            IntentKind::Refinement { .. } => "refinement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_output_full_deserialization() {
        let json = r#"{
            "user_intent": "job_creation",
            "role_info": {"job_role": "Data Engineer", "location": "NYC", "company_name": "Acme"},
            "feedback": null,
            "answer_message": null,
            "reasoning": "all fields present"
        }"#;
        let out: RouterOutput = serde_json::from_str(json).unwrap();
        assert_eq!(out.user_intent, RawIntent::JobCreation);
        assert!(out.role_info.unwrap().is_complete());
        assert!(out.feedback.is_none());
    }

    #[test]
    fn test_router_output_minimal_deserialization() {
        let json = r#"{"user_intent": "conversation", "reasoning": "greeting only"}"#;
        let out: RouterOutput = serde_json::from_str(json).unwrap();
        assert_eq!(out.user_intent, RawIntent::Conversation);
        assert!(out.role_info.is_none());
    }

    #[test]
    fn test_router_output_missing_reasoning_is_schema_violation() {
        let json = r#"{"user_intent": "conversation"}"#;
        let result: Result<RouterOutput, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_router_output_unknown_intent_is_schema_violation() {
        let json = r#"{"user_intent": "chit_chat", "reasoning": "x"}"#;
        let result: Result<RouterOutput, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_intent_kind_name() {
        let intent = Intent {
            kind: IntentKind::Conversation { missing_fields: vec![] },
            reasoning: "r".to_string(),
        };
        assert_eq!(intent.kind_name(), "conversation");
    }
}
