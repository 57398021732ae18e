//! Response Parser
//!
//! Converts a raw model turn into exactly one `ChatResponse` variant.
//! `propose_operations` takes precedence over `ask_questions`; anything
//! else falls through to a plain text `Message`. Structurally invalid
//! operations are dropped with a warning rather than failing the turn.

use serde_json::Value;
use taskweave_core::{ChatResponse, Operation, Question};
use taskweave_llm::{LlmResponse, ToolCall};
use taskweave_tools::{ASK_QUESTIONS, PROPOSE_OPERATIONS};

/// Parse a terminal model turn into the application response.
pub fn parse_response(response: &LlmResponse) -> ChatResponse {
    if let Some(call) = find_call(response, PROPOSE_OPERATIONS) {
        return ChatResponse::Actions {
            operations: extract_operations(&call.arguments),
        };
    }

    if let Some(call) = find_call(response, ASK_QUESTIONS) {
        return ChatResponse::Questions {
            questions: extract_questions(&call.arguments),
        };
    }

    ChatResponse::Message {
        text: response.content.clone().unwrap_or_default(),
    }
}

fn find_call<'a>(response: &'a LlmResponse, name: &str) -> Option<&'a ToolCall> {
    response.tool_calls.iter().find(|tc| tc.name == name)
}

/// Extract operations from a `propose_operations` payload, dropping any
/// that fail shape validation for their kind.
pub fn extract_operations(arguments: &Value) -> Vec<Operation> {
    let Some(items) = arguments.get("operations").and_then(Value::as_array) else {
        tracing::warn!("propose_operations payload has no operations array");
        return Vec::new();
    };

    let mut operations = Vec::with_capacity(items.len());
    for item in items {
        let op: Operation = match serde_json::from_value(item.clone()) {
            Ok(op) => op,
            Err(e) => {
                tracing::warn!(error = %e, "dropping undeserializable operation");
                continue;
            }
        };
        if let Err(reason) = op.validate_shape() {
            tracing::warn!(%reason, "dropping operation with invalid shape");
            continue;
        }
        operations.push(op);
    }
    operations
}

/// Extract questions from an `ask_questions` payload. Lenient: a bare
/// string item becomes a prompt-only question.
pub fn extract_questions(arguments: &Value) -> Vec<Question> {
    let Some(items) = arguments.get("questions").and_then(Value::as_array) else {
        tracing::warn!("ask_questions payload has no questions array");
        return Vec::new();
    };

    let mut questions = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(prompt) => questions.push(Question {
                prompt: prompt.clone(),
                options: Vec::new(),
            }),
            _ => match serde_json::from_value::<Question>(item.clone()) {
                Ok(q) => questions.push(q),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping undeserializable question");
                }
            },
        }
    }
    questions
}
