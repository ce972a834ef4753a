//! Domain types for HireDaemon
//!
//! Core conversation state: FlowState, the per-session aggregate persisted
//! between turns, plus the message history, role extraction, and intent types
//! the router produces.

mod intent;
mod message;
mod role_info;
mod state;

pub use intent::{Intent, IntentKind, RawIntent, RouterOutput};
pub use message::{ChatRole, Message};
pub use role_info::{RoleField, RoleInfo};
pub use state::FlowState;
