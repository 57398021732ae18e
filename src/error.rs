//! Engine Errors
//!
//! Failures that end a request. Tool-level failures never appear here;
//! they become error ToolResults inside the transcript and the loop
//! continues.

use taskweave_llm::LlmError;
use thiserror::Error;

/// User-facing message when the tool loop hits its iteration cap
pub const ITERATION_LIMIT_MESSAGE: &str =
    "Too many tool calls for one request. Try rephrasing or simplifying your message.";

/// Errors from one orchestration run
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request carried no message text and no attachments
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// An attachment could not be resolved to bytes; the transcript must
    /// never be sent partially inlined
    #[error("Attachment could not be resolved: {url} ({reason})")]
    AttachmentUnresolved { url: String, reason: String },

    /// The model violated the turn protocol (unexpected stop reason,
    /// malformed terminal output)
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// The tool loop ran out of iterations without a terminal turn
    #[error("{ITERATION_LIMIT_MESSAGE}")]
    IterationLimit,

    /// The provider call failed after retries
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}
