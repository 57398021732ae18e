//! Object Store Interface
//!
//! Attachment bytes live in an external object store with two buckets:
//! temporary uploads and permanent files. Attachment URLs encode the
//! bucket in the leading path segment.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Which bucket an object lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBucket {
    /// Short-lived uploads, keyed under a `tmp/` path prefix
    Temporary,
    /// Long-lived files
    Permanent,
}

/// Errors from object retrieval
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object read failed: {0}")]
    Read(String),
}

/// Read-only access to attachment bytes
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: StorageBucket, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// Parse an attachment URL into its bucket and object key.
///
/// The object key is the URL path with the leading slash stripped; keys
/// beginning with `tmp/` live in the temporary bucket.
pub fn parse_object_url(raw: &str) -> Result<(StorageBucket, String), String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid attachment url: {}", e))?;
    let key = url.path().trim_start_matches('/').to_string();
    if key.is_empty() {
        return Err("attachment url has no object key".to_string());
    }
    let bucket = if key.starts_with("tmp/") {
        StorageBucket::Temporary
    } else {
        StorageBucket::Permanent
    };
    Ok((bucket, key))
}
