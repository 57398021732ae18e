//! Conversation Domain Model
//!
//! Types exchanged between the surrounding application and the conversation
//! engine: conversation turns with file attachments on the way in, and the
//! discriminated `ChatResponse` on the way out.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// Reference to a stored file attached to a turn.
///
/// The bytes are not owned by the turn; they are resolved lazily against the
/// object store when the transcript is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    /// Storage URL of the object (bucket selector + key are parsed from the path)
    pub url: String,
    /// MIME type as recorded at upload time
    pub mime_type: String,
    /// Object size in bytes
    pub size_bytes: u64,
}

impl FileRef {
    /// Whether this attachment should be inlined as an image content block.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// One message in the conversation history. Immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<FileRef>,
}

impl ConversationTurn {
    /// Create a user turn with no attachments
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Attach file references to this turn
    pub fn with_attachments(mut self, attachments: Vec<FileRef>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Kind of a proposed data operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

/// Entity a proposed operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Task,
    Note,
    Project,
}

/// One proposed create/update/delete against the user's data.
///
/// The engine validates shape only (which fields the kind requires); semantic
/// validation belongs to the application layer that applies the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub entity_type: EntityType,
    /// Target record id; required for update and delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full payload for create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Field-level changes for update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    /// Model-supplied rationale shown to the user alongside the proposal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Operation {
    /// Check that the fields required by this operation's kind are present.
    pub fn validate_shape(&self) -> CoreResult<()> {
        match self.kind {
            OperationKind::Create => {
                if self.data.is_none() {
                    return Err(CoreError::validation("create operation is missing `data`"));
                }
            }
            OperationKind::Update => {
                if self.id.is_none() {
                    return Err(CoreError::validation("update operation is missing `id`"));
                }
                if self.changes.is_none() {
                    return Err(CoreError::validation(
                        "update operation is missing `changes`",
                    ));
                }
            }
            OperationKind::Delete => {
                if self.id.is_none() {
                    return Err(CoreError::validation("delete operation is missing `id`"));
                }
            }
        }
        Ok(())
    }
}

/// A clarifying question proposed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Terminal output of one engine request. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatResponse {
    /// Plain conversational reply
    Message { text: String },
    /// Structured proposal of data operations for the user to confirm
    Actions { operations: Vec<Operation> },
    /// Clarifying questions before the assistant can act
    Questions { questions: Vec<Question> },
}
