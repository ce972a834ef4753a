//! OpenAI API client implementation
//!
//! Implements the LlmClient trait for OpenAI's Chat Completions API with
//! bounded retries for transient errors and JSON mode for structured output.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Create a new client from configuration
    ///
    /// The API key is read from the environment variable named in the config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "OpenAIClient::from_config: called");
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            LlmError::InvalidResponse(format!("API key not found in environment variable {}", config.api_key_env))
        })?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the OpenAI API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(model = %self.model, max_tokens = %request.max_tokens, json_mode = %request.json_mode, "build_request_body: called");

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system_prompt,
        })];

        for msg in &request.messages {
            messages.push(serde_json::json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let max_tokens = request.max_tokens.min(self.max_tokens);

        // GPT-5.x and o1/o3 models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if request.json_mode {
            debug!("build_request_body: enabling JSON response format");
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        body
    }

    async fn send_once(&self, body: &serde_json::Value) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(%url, "send_once: sending request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        debug!(%status, "send_once: response received");

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30));
            return Err(LlmError::RateLimited { retry_after });
        }

        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(LlmError::ApiError { status, message });
        }

        let parsed: ChatResponse = response.json().await.map_err(LlmError::Network)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No content in completion".to_string()))?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse { content, usage })
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %self.model, "complete: called");
        let body = self.build_request_body(&request);

        let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut last_err = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                debug!(%attempt, ?backoff, "complete: retrying after backoff");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.send_once(&body).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let retryable = match &e {
                        LlmError::RateLimited { .. } => true,
                        LlmError::ApiError { status, .. } => is_retryable_status(*status),
                        LlmError::Network(_) => true,
                        _ => false,
                    };
                    if !retryable {
                        return Err(e);
                    }
                    warn!(error = %e, %attempt, "complete: transient error");
                    if let Some(retry_after) = e.retry_after() {
                        backoff = backoff.max(retry_after);
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| LlmError::InvalidResponse("retries exhausted".to_string())))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    fn test_client(model: &str) -> OpenAIClient {
        OpenAIClient {
            model: model.to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://api.openai.com".to_string(),
            http: Client::new(),
            max_tokens: 4096,
        }
    }

    #[test]
    fn test_build_request_body_basic() {
        let client = test_client("gpt-4o-mini");
        let req = CompletionRequest {
            system_prompt: "be brief".to_string(),
            messages: vec![Message::user("hi"), Message::assistant("hello")],
            max_tokens: 1000,
            json_mode: false,
        };

        let body = client.build_request_body(&req);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][2]["role"], "assistant");
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_gpt5_uses_max_completion_tokens() {
        let client = test_client("gpt-5-nano");
        let req = CompletionRequest::text("s", "u", 500);

        let body = client.build_request_body(&req);
        assert_eq!(body["max_completion_tokens"], 500);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_json_mode_sets_response_format() {
        let client = test_client("gpt-5-nano");
        let mut req = CompletionRequest::text("s", "u", 500);
        req.json_mode = true;

        let body = client.build_request_body(&req);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_max_tokens_capped_by_config() {
        let client = test_client("gpt-4o");
        let req = CompletionRequest::text("s", "u", 1_000_000);

        let body = client.build_request_body(&req);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_retryable_status_codes() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
    }
}
