//! Taskweave Tools
//!
//! The tool surface the conversation engine exposes to the model:
//!
//! - `ToolResult` - execution result type fed back into the transcript
//! - `definitions` - query + terminal tool definitions and classifiers
//! - `datastore` - read-only, credential-scoped data access trait
//! - `ToolExecutor` - authorized dispatch of query tool calls
//!
//! Query tools never create, update, or delete. The two terminal tools
//! (`propose_operations`, `ask_questions`) are never executed here; their
//! presence in a model turn is a signal the orchestrator resolves at parse
//! time.

pub mod datastore;
pub mod definitions;
pub mod executor;
pub mod result;

pub use datastore::{
    DataStore, DataStoreError, FileFilter, FileRecord, NoteFilter, NoteRecord, ProjectFilter,
    ProjectRecord, TaskFilter, TaskRecord,
};
pub use definitions::{
    is_query_tool, is_terminal_tool, tool_definitions, ASK_QUESTIONS, PROPOSE_OPERATIONS,
    QUERY_FILES, QUERY_NOTES, QUERY_PROJECTS, QUERY_TASKS,
};
pub use executor::ToolExecutor;
pub use result::ToolResult;
