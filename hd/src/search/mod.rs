//! Web search tool for research and refinement tasks
//!
//! Research tasks ground their output in live search results; the router
//! never touches this module. The trait keeps the flow layer testable with
//! scripted results.

mod error;
mod http;

use async_trait::async_trait;

pub use error::ToolError;
pub use http::HttpSearchTool;

/// One search result
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Web search abstraction
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Run a query, returning results in relevance order
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ToolError>;
}

/// Format hits as a text block for inclusion in a prompt
pub fn hits_as_text(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "(no search results)".to_string();
    }
    hits.iter()
        .map(|h| format!("- {} ({})\n  {}", h.title, h.url, h.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}
