//! SessionStore - durable per-session state persistence
//!
//! A small file-backed key-value store mapping session identifiers to
//! serialized state snapshots. One JSON file per session, atomic saves via
//! write-to-temp-then-rename, and an advisory lock guarding concurrent saves.
//!
//! The store is deliberately generic: it persists any `Serialize +
//! DeserializeOwned + Default` state type. Loading an unknown session id never
//! fails - it returns the default state, which is what lets a conversation
//! start from its first message without a separate "create session" step.
//!
//! Callers must serialize turns per session: the store gives atomic
//! last-writer-wins saves, not cross-turn mutual exclusion.

mod store;

pub use store::{SessionStore, StoreError};
