//! HTTP search tool implementation
//!
//! Queries a SearXNG-compatible JSON search endpoint. Any instance exposing
//! `GET /search?q=...&format=json` works.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{SearchHit, SearchTool, ToolError};
use crate::config::SearchConfig;

/// Search tool backed by an HTTP JSON endpoint
pub struct HttpSearchTool {
    base_url: String,
    max_results: usize,
    http: reqwest::Client,
}

impl HttpSearchTool {
    /// Create a tool from configuration
    pub fn from_config(config: &SearchConfig) -> Result<Self, ToolError> {
        debug!(base_url = %config.base_url, max_results = config.max_results, "HttpSearchTool::from_config: called");
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent("hiredaemon/0.1 (search tool)")
            .build()
            .map_err(ToolError::Network)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            max_results: config.max_results,
            http,
        })
    }

    fn parse_results(&self, body: &str) -> Result<Vec<SearchHit>, ToolError> {
        let parsed: SearchResponse = serde_json::from_str(body)
            .map_err(|e| ToolError::InvalidResponse(format!("unparseable search response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .take(self.max_results)
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                snippet: r.content,
            })
            .collect())
    }
}

#[async_trait]
impl SearchTool for HttpSearchTool {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ToolError> {
        debug!(%query, "search: called");
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(ToolError::Network)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_else(|_| "<no body>".to_string());
            debug!(%status, "search: non-success status");
            return Err(ToolError::ApiError { status, message });
        }

        let body = response.text().await.map_err(ToolError::Network)?;
        let hits = self.parse_results(&body)?;
        debug!(hit_count = hits.len(), "search: results parsed");
        Ok(hits)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tool(max_results: usize) -> HttpSearchTool {
        HttpSearchTool {
            base_url: "http://localhost:8888".to_string(),
            max_results,
            http: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_parse_results() {
        let body = r#"{
            "results": [
                {"title": "A", "url": "https://a.example", "content": "first"},
                {"title": "B", "url": "https://b.example", "content": "second"}
            ]
        }"#;

        let hits = test_tool(10).parse_results(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "A");
        assert_eq!(hits[1].snippet, "second");
    }

    #[test]
    fn test_parse_results_caps_at_max() {
        let body = r#"{
            "results": [
                {"title": "A", "url": "u", "content": "c"},
                {"title": "B", "url": "u", "content": "c"},
                {"title": "C", "url": "u", "content": "c"}
            ]
        }"#;

        let hits = test_tool(2).parse_results(body).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_parse_results_empty_body() {
        let hits = test_tool(5).parse_results("{}").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_parse_results_rejects_garbage() {
        let result = test_tool(5).parse_results("not json");
        assert!(matches!(result, Err(ToolError::InvalidResponse(_))));
    }
}
