//! Taskweave Assistant
//!
//! Tool-orchestration conversation engine for the Taskweave personal task
//! manager. One user message plus conversation history goes in; exactly one
//! typed `ChatResponse` comes out, produced by a bounded tool loop against
//! an LLM backend.
//!
//! ## Module Organization
//!
//! - `engine` - `AssistantEngine`, the public entry point
//! - `formatter` - history windowing, summary injection, image inlining
//! - `mode` - mode to tool-set and parameter mapping
//! - `orchestrator` - the bounded tool loop
//! - `parser` - terminal model turn to `ChatResponse`
//! - `object_store` - attachment byte access trait
//! - `config` / `error` - engine knobs and failure taxonomy
//!
//! Domain types live in `taskweave-core`, provider plumbing in
//! `taskweave-llm`, and the tool surface in `taskweave-tools`.

pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod mode;
pub mod object_store;
pub mod orchestrator;
pub mod parser;

pub use config::EngineConfig;
pub use engine::{build_system_prompt, AssistantEngine, ChatRequest};
pub use error::EngineError;
pub use mode::{params_for_mode, tools_for_mode, ChatMode, ModeParams};
pub use object_store::{ObjectStore, ObjectStoreError, StorageBucket};
pub use orchestrator::{LoopOutcome, LoopState, Orchestrator};
pub use parser::parse_response;

pub use taskweave_core::{
    AuthToken, ChatResponse, ConversationTurn, EntityType, FileRef, Operation, OperationKind,
    Question, TurnRole,
};
