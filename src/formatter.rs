//! Message Formatter
//!
//! Assembles the backend-ready transcript from conversation history, an
//! optional summary of older turns, and the current user message. Image
//! attachments are resolved to bytes against the object store and inlined
//! as base64 image blocks; any unresolvable attachment fails the request
//! rather than sending a partially inlined transcript.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use taskweave_core::{ConversationTurn, FileRef, TurnRole};
use taskweave_llm::{Message, MessageContent, MessageRole};

use crate::error::EngineError;
use crate::object_store::{parse_object_url, ObjectStore};

/// Build the backend transcript.
///
/// History is windowed to the most recent `history_window` turns. A summary,
/// when present, is injected as a synthetic leading user turn so it always
/// precedes the verbatim turns. A leading assistant turn after windowing is
/// dropped when no summary replaces the user turn that preceded it.
pub async fn format_transcript(
    current_message: &str,
    current_attachments: &[FileRef],
    history: &[ConversationTurn],
    summary: Option<&str>,
    history_window: usize,
    store: &dyn ObjectStore,
) -> Result<Vec<Message>, EngineError> {
    let start = history.len().saturating_sub(history_window);
    let mut window = &history[start..];

    // Backends reject transcripts that open with an assistant turn.
    if summary.is_none() {
        if let Some(first) = window.first() {
            if first.role == TurnRole::Assistant {
                window = &window[1..];
            }
        }
    }

    let mut transcript = Vec::with_capacity(window.len() + 2);

    if let Some(summary) = summary {
        transcript.push(Message::user(format!(
            "Summary of the earlier conversation:\n{}",
            summary
        )));
    }

    for turn in window {
        transcript.push(turn_to_message(turn, store).await?);
    }

    let current = ConversationTurn::user(current_message)
        .with_attachments(current_attachments.to_vec());
    transcript.push(turn_to_message(&current, store).await?);

    Ok(transcript)
}

async fn turn_to_message(
    turn: &ConversationTurn,
    store: &dyn ObjectStore,
) -> Result<Message, EngineError> {
    let role = match turn.role {
        TurnRole::User => MessageRole::User,
        TurnRole::Assistant => MessageRole::Assistant,
    };

    if turn.attachments.is_empty() {
        return Ok(Message::text(role, turn.text.clone()));
    }

    let mut content = Vec::with_capacity(turn.attachments.len() + 1);
    let mut references = Vec::new();

    for attachment in &turn.attachments {
        if attachment.is_image() {
            content.push(inline_image(attachment, store).await?);
        } else {
            references.push(format!("[attached file: {}]", attachment.url));
        }
    }

    let mut text = turn.text.clone();
    if !references.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&references.join("\n"));
    }
    // The backend rejects empty text blocks; an image-only turn sends
    // just its image blocks.
    if !text.is_empty() || content.is_empty() {
        content.push(MessageContent::Text { text });
    }

    Ok(Message { role, content })
}

async fn inline_image(
    attachment: &FileRef,
    store: &dyn ObjectStore,
) -> Result<MessageContent, EngineError> {
    let (bucket, key) =
        parse_object_url(&attachment.url).map_err(|reason| EngineError::AttachmentUnresolved {
            url: attachment.url.clone(),
            reason,
        })?;

    let bytes = store
        .get(bucket, &key)
        .await
        .map_err(|e| EngineError::AttachmentUnresolved {
            url: attachment.url.clone(),
            reason: e.to_string(),
        })?;

    tracing::debug!(url = %attachment.url, size = bytes.len(), "inlined image attachment");

    Ok(MessageContent::Image {
        media_type: attachment.mime_type.clone(),
        data: BASE64.encode(bytes),
    })
}
