//! LLM client module for HireDaemon
//!
//! Provides the structured inference backend abstraction: a completion trait,
//! the OpenAI implementation, and schema-validated JSON inference.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: openai",
            other
        ))),
    }
}

/// Run a completion and parse the response into a target schema
///
/// Forces JSON mode on the request, sends it, and deserializes the answer.
/// A response that is not valid JSON for the target type is a
/// [`LlmError::SchemaViolation`] - the backend's raw answer is never trusted
/// past this point.
pub async fn infer<T: DeserializeOwned>(
    llm: &Arc<dyn LlmClient>,
    mut request: CompletionRequest,
) -> Result<T, LlmError> {
    debug!("infer: called");
    request.json_mode = true;
    let response = llm.complete(request).await?;
    let text = strip_code_fences(response.content.trim());
    serde_json::from_str(text).map_err(|e| {
        debug!(error = %e, "infer: response failed schema validation");
        LlmError::SchemaViolation(format!("response does not match target schema: {}", e))
    })
}

/// Strip markdown code fences some models wrap JSON objects in
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .map(|t| t.trim_start());
    match inner {
        Some(rest) => rest.strip_suffix("```").map(|t| t.trim_end()).unwrap_or(rest),
        None => text,
    }
}
