//! Shared domain types for Open Notebook.
//!
//! This crate contains the core domain types used across the platform:
//! Notebook, ChatSession, ChatMessage, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod notebook;
