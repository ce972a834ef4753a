//! HireDaemon - Conversational HR job posting orchestrator
//!
//! HireDaemon drives a multi-turn conversation that collects job details,
//! researches the role, and produces a job posting the user can then refine.
//! Every turn is durable: session state is reloaded from disk at the start of
//! a turn and written back at the end, so a restart never loses a
//! conversation.
//!
//! # Core Concepts
//!
//! - **Intent routing**: each message is classified into conversation, job
//!   creation, or refinement - and the claim is validated against session
//!   state before anything runs
//! - **Fan-out research**: job creation runs two research tasks in parallel
//!   and joins both before the writer sees anything
//! - **Durable sessions**: one JSON snapshot per session, written atomically
//!   once per turn
//!
//! # Modules
//!
//! - [`flow`] - Turn controller, router, and the three execution paths
//! - [`tasks`] - Research and writer leaf tasks
//! - [`llm`] - LLM client trait and OpenAI implementation
//! - [`search`] - Web search tool
//! - [`domain`] - Session state and intent types
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod flow;
pub mod llm;
pub mod prompts;
pub mod search;
pub mod tasks;

// Re-export commonly used types
pub use config::{Config, LlmConfig, SearchConfig, StorageConfig};
pub use domain::{FlowState, Intent, IntentKind, RoleInfo};
pub use flow::{FlowController, FlowError, TurnOutcome};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use search::{HttpSearchTool, SearchTool};
