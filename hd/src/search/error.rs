//! Search tool error types

use thiserror::Error;

/// Errors from the web search tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}
