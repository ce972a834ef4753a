//! LLM request/response types
//!
//! These model the OpenAI Chat Completions API but stay provider-agnostic.
//! Flow handlers exchange plain text with the backend; structured output goes
//! through JSON mode plus [`crate::llm::infer`].

use serde::{Deserialize, Serialize};

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (rendered from a Handlebars template)
    pub system_prompt: String,

    /// Conversation context messages
    pub messages: Vec<Message>,

    /// Max tokens for the response (from config)
    pub max_tokens: u32,

    /// Ask the backend for a single JSON object instead of prose
    pub json_mode: bool,
}

impl CompletionRequest {
    /// A plain free-text request with a single user message
    pub fn text(system_prompt: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: vec![Message::user(user)],
            max_tokens,
            json_mode: false,
        }
    }
}

/// A message in the backend conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A completed LLM response
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Response text
    pub content: String,

    /// Token usage for this call
    pub usage: TokenUsage,
}

/// Token usage accounting
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_defaults() {
        let req = CompletionRequest::text("system", "hello", 512);
        assert!(!req.json_mode);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
    }

    #[test]
    fn test_assistant_message_role() {
        let msg = Message::assistant("hello");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "hello");
    }
}
