//! Flow orchestration engine
//!
//! The state machine driving each conversation turn:
//! `Idle -> Classifying -> {Conversing | Creating | Refining} -> Idle`.
//! The transition out of `Classifying` is decided by the router's validated
//! intent; exactly one execution path runs per turn.

mod controller;
mod conversation;
mod creation;
mod error;
mod refinement;
mod router;

pub use controller::{FlowController, TurnOutcome};
pub use conversation::ConversationHandler;
pub use creation::JobCreationOrchestrator;
pub use error::FlowError;
pub use refinement::RefinementHandler;
pub use router::Router;
