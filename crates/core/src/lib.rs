//! Taskweave Core
//!
//! Foundational types for the Taskweave conversation engine. This crate has
//! zero dependencies on application-level code (HTTP client, LLM providers,
//! storage backends).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `chat` - Conversation domain model (`ConversationTurn`, `ChatResponse`, `Operation`)
//! - `auth` - Request-scoped credential type (`AuthToken`)
//!
//! ## Design Principles
//!
//! 1. **Minimal dependencies** - serde + thiserror only
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod auth;
pub mod chat;
pub mod error;

pub use auth::AuthToken;
pub use chat::{
    ChatResponse, ConversationTurn, EntityType, FileRef, Operation, OperationKind, Question,
    TurnRole,
};
pub use error::{CoreError, CoreResult};
