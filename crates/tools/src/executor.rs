//! Tool Executor
//!
//! Dispatches query tool calls to the data store. Every query requires the
//! caller's credential; absence produces a structured error result the model
//! can recover from conversationally, never a crash.

use std::sync::Arc;

use serde_json::{json, Value};
use taskweave_core::AuthToken;

use crate::datastore::{
    clamp_limit, DataStore, FileFilter, NoteFilter, ProjectFilter, TaskFilter,
};
use crate::definitions::{
    is_terminal_tool, QUERY_FILES, QUERY_NOTES, QUERY_PROJECTS, QUERY_TASKS,
};
use crate::result::ToolResult;

/// Result text fed back for a terminal tool when the loop continues past it
pub const TERMINAL_STUB: &str = "This request will be handled in the final response.";

fn auth_required_payload() -> String {
    json!({"error": true, "message": "Authentication required"}).to_string()
}

fn query_failed_payload(message: &str) -> String {
    json!({"error": true, "message": message}).to_string()
}

/// Executes query tool calls against the data store
pub struct ToolExecutor {
    store: Arc<dyn DataStore>,
}

impl ToolExecutor {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Execute a single tool call.
    ///
    /// Terminal tools are not executed; they get a fixed stub result so a
    /// turn that continues past them still has one result per call id.
    pub async fn execute(
        &self,
        name: &str,
        input: &Value,
        auth: Option<&AuthToken>,
    ) -> ToolResult {
        if is_terminal_tool(name) {
            return ToolResult::ok(TERMINAL_STUB);
        }

        let Some(token) = auth else {
            tracing::warn!(tool = name, "tool call without credential");
            return ToolResult::err(auth_required_payload());
        };

        match name {
            QUERY_TASKS => self.query_tasks(input, token).await,
            QUERY_NOTES => self.query_notes(input, token).await,
            QUERY_PROJECTS => self.query_projects(input, token).await,
            QUERY_FILES => self.query_files(input, token).await,
            other => {
                tracing::warn!(tool = other, "unknown tool requested by model");
                ToolResult::err(query_failed_payload(&format!("Unknown tool: {}", other)))
            }
        }
    }

    async fn query_tasks(&self, input: &Value, auth: &AuthToken) -> ToolResult {
        let mut filter: TaskFilter = match serde_json::from_value(input.clone()) {
            Ok(f) => f,
            Err(e) => return invalid_input(QUERY_TASKS, &e),
        };
        filter.limit = clamp_limit(filter.limit);
        match self.store.list_tasks(&filter, auth).await {
            Ok(rows) => serialize_rows(&rows),
            Err(e) => ToolResult::err(query_failed_payload(&e.to_string())),
        }
    }

    async fn query_notes(&self, input: &Value, auth: &AuthToken) -> ToolResult {
        let mut filter: NoteFilter = match serde_json::from_value(input.clone()) {
            Ok(f) => f,
            Err(e) => return invalid_input(QUERY_NOTES, &e),
        };
        filter.limit = clamp_limit(filter.limit);
        match self.store.list_notes(&filter, auth).await {
            Ok(rows) => serialize_rows(&rows),
            Err(e) => ToolResult::err(query_failed_payload(&e.to_string())),
        }
    }

    async fn query_projects(&self, input: &Value, auth: &AuthToken) -> ToolResult {
        let mut filter: ProjectFilter = match serde_json::from_value(input.clone()) {
            Ok(f) => f,
            Err(e) => return invalid_input(QUERY_PROJECTS, &e),
        };
        filter.limit = clamp_limit(filter.limit);
        match self.store.list_projects(&filter, auth).await {
            Ok(rows) => serialize_rows(&rows),
            Err(e) => ToolResult::err(query_failed_payload(&e.to_string())),
        }
    }

    async fn query_files(&self, input: &Value, auth: &AuthToken) -> ToolResult {
        let mut filter: FileFilter = match serde_json::from_value(input.clone()) {
            Ok(f) => f,
            Err(e) => return invalid_input(QUERY_FILES, &e),
        };
        filter.limit = clamp_limit(filter.limit);
        match self.store.list_files(&filter, auth).await {
            Ok(rows) => serialize_rows(&rows),
            Err(e) => ToolResult::err(query_failed_payload(&e.to_string())),
        }
    }
}

fn invalid_input(tool: &str, err: &serde_json::Error) -> ToolResult {
    tracing::warn!(tool, error = %err, "tool input failed to deserialize");
    ToolResult::err(query_failed_payload(&format!("Invalid input: {}", err)))
}

fn serialize_rows<T: serde::Serialize>(rows: &[T]) -> ToolResult {
    match serde_json::to_string(rows) {
        Ok(json) => ToolResult::ok(json),
        Err(e) => ToolResult::err(query_failed_payload(&e.to_string())),
    }
}
