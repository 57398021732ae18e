//! Data Access for Query Tools
//!
//! Read-only, credential-scoped lookups against the user's task, note,
//! project and file records. The surrounding application owns the actual
//! storage; this crate only defines the trait the executors call through.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskweave_core::AuthToken;
use thiserror::Error;

/// Hard ceiling on rows returned by one query tool call
pub const MAX_QUERY_LIMIT: usize = 50;

/// Limit applied when the model omits one
pub const DEFAULT_QUERY_LIMIT: usize = 20;

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

/// Clamp a requested limit into the allowed range
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_QUERY_LIMIT)
}

/// Errors from the backing data store
#[derive(Debug, Error)]
pub enum DataStoreError {
    /// The credential did not authorize the read
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The query itself failed
    #[error("Query failed: {0}")]
    Query(String),
}

/// Filter input for the `query_tasks` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Task status, e.g. "todo", "in_progress", "done"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Restrict to tasks belonging to one project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Case-insensitive substring match on the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Maximum number of rows to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Filter input for the `query_notes` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Case-insensitive substring match on title or body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Filter input for the `query_projects` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Project status, e.g. "active", "archived"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Filter input for the `query_files` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// MIME type prefix match, e.g. "image/"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// A task row as serialized back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// A note row as serialized back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// A project row as serialized back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A file row as serialized back to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Read-only access to the user's records.
///
/// Every method takes the caller's credential; implementations must scope
/// the read to that user and never return cross-user rows.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_tasks(
        &self,
        filter: &TaskFilter,
        auth: &AuthToken,
    ) -> Result<Vec<TaskRecord>, DataStoreError>;

    async fn list_notes(
        &self,
        filter: &NoteFilter,
        auth: &AuthToken,
    ) -> Result<Vec<NoteRecord>, DataStoreError>;

    async fn list_projects(
        &self,
        filter: &ProjectFilter,
        auth: &AuthToken,
    ) -> Result<Vec<ProjectRecord>, DataStoreError>;

    async fn list_files(
        &self,
        filter: &FileFilter,
        auth: &AuthToken,
    ) -> Result<Vec<FileRecord>, DataStoreError>;
}
