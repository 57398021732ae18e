//! Engine Integration Tests
//!
//! Full request-to-response paths: formatting, mode policy, tool
//! round-trips, authorization, and terminal parsing.

use std::sync::Arc;

use serde_json::{json, Value};
use taskweave_assistant::{ChatMode, ChatRequest, ChatResponse, EngineError};
use taskweave_core::{AuthToken, ConversationTurn, FileRef, OperationKind};
use taskweave_llm::MessageContent;

use crate::support::{
    engine_with, task, terminal_tool_turn, text_turn, tool_turn, MemoryObjects, MemoryStore,
    ScriptedProvider,
};

fn authed(mut request: ChatRequest) -> ChatRequest {
    request.auth_token = Some(AuthToken::new("tok-1"));
    request
}

#[tokio::test]
async fn plain_question_yields_message_with_one_call() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("4")]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let response = engine
        .handle(ChatRequest::new("What's 2+2?", ChatMode::Chat))
        .await
        .unwrap();

    assert_eq!(
        response,
        ChatResponse::Message {
            text: "4".to_string()
        }
    );
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let engine = engine_with(
        provider,
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let err = engine
        .handle(ChatRequest::new("   ", ChatMode::Chat))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::EmptyMessage));
}

#[tokio::test]
async fn single_query_round_trip_makes_exactly_two_calls() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(vec![(
            "toolu_1",
            "query_tasks",
            json!({"status": "todo", "limit": 5}),
        )]),
        text_turn("You have 2 open tasks: buy milk and water plants."),
    ]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new(
            "tok-1",
            vec![
                task("t1", "Buy milk", "todo"),
                task("t2", "Water plants", "todo"),
                task("t3", "Old thing", "done"),
            ],
        ),
        MemoryObjects::empty(),
    );

    let response = engine
        .handle(authed(ChatRequest::new("What's on my plate?", ChatMode::Chat)))
        .await
        .unwrap();

    assert!(matches!(response, ChatResponse::Message { .. }));
    assert_eq!(provider.call_count(), 2);

    // The second call's transcript must carry exactly one result per call id.
    let calls = provider.calls.lock().unwrap();
    let second = &calls[1].messages;
    let results: Vec<&MessageContent> = second
        .iter()
        .flat_map(|m| m.content.iter())
        .filter(|c| matches!(c, MessageContent::ToolResult { .. }))
        .collect();
    assert_eq!(results.len(), 1);
    match results[0] {
        MessageContent::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            assert_eq!(tool_use_id, "toolu_1");
            assert!(is_error.is_none());
            let rows: Vec<Value> = serde_json::from_str(content).unwrap();
            assert_eq!(rows.len(), 2);
        }
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn missing_credential_feeds_structured_error_and_loop_continues() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(vec![("toolu_1", "query_tasks", json!({}))]),
        text_turn("I can't see your tasks until you sign in."),
    ]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![task("t1", "Buy milk", "todo")]),
        MemoryObjects::empty(),
    );

    // No auth token on the request.
    let response = engine
        .handle(ChatRequest::new("Show my tasks", ChatMode::Chat))
        .await
        .unwrap();

    assert!(matches!(response, ChatResponse::Message { .. }));
    assert_eq!(provider.call_count(), 2);

    let calls = provider.calls.lock().unwrap();
    let result = calls[1]
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .find_map(|c| match c {
            MessageContent::ToolResult {
                content, is_error, ..
            } => Some((content.clone(), *is_error)),
            _ => None,
        })
        .unwrap();

    assert_eq!(result.1, Some(true));
    let payload: Value = serde_json::from_str(&result.0).unwrap();
    assert_eq!(payload["error"], json!(true));
    assert_eq!(payload["message"], json!("Authentication required"));
}

#[tokio::test]
async fn concurrent_calls_each_get_a_result() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(vec![
            ("toolu_1", "query_tasks", json!({})),
            ("toolu_2", "query_notes", json!({})),
            ("toolu_3", "query_projects", json!({})),
        ]),
        text_turn("done"),
    ]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    engine
        .handle(authed(ChatRequest::new("Everything please", ChatMode::Chat)))
        .await
        .unwrap();

    let calls = provider.calls.lock().unwrap();
    let mut ids: Vec<String> = calls[1]
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|c| match c {
            MessageContent::ToolResult { tool_use_id, .. } => Some(tool_use_id.clone()),
            _ => None,
        })
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["toolu_1", "toolu_2", "toolu_3"]);
}

#[tokio::test]
async fn failing_call_is_flagged_without_touching_its_siblings() {
    // One succeeding query and one unknown tool in the same turn.
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(vec![
            ("toolu_ok", "query_tasks", json!({})),
            ("toolu_bad", "query_everything", json!({})),
        ]),
        text_turn("partial answer"),
    ]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![task("t1", "Buy milk", "todo")]),
        MemoryObjects::empty(),
    );

    let response = engine
        .handle(authed(ChatRequest::new("look everything up", ChatMode::Chat)))
        .await
        .unwrap();
    assert!(matches!(response, ChatResponse::Message { .. }));

    let calls = provider.calls.lock().unwrap();
    let mut results: Vec<(String, Option<bool>)> = calls[1]
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|c| match c {
            MessageContent::ToolResult {
                tool_use_id,
                is_error,
                ..
            } => Some((tool_use_id.clone(), *is_error)),
            _ => None,
        })
        .collect();
    results.sort();

    // Both ids got a result; only the unknown tool's is flagged.
    assert_eq!(
        results,
        vec![
            ("toolu_bad".to_string(), Some(true)),
            ("toolu_ok".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn image_only_message_sends_no_empty_text_block() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("A receipt.")]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty().with("uploads/receipt.png", b"fakepng"),
    );

    let mut request = ChatRequest::new("", ChatMode::Chat);
    request.attachments = vec![FileRef {
        url: "https://files.example.com/uploads/receipt.png".to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 7,
    }];
    engine.handle(request).await.unwrap();

    let calls = provider.calls.lock().unwrap();
    let has_empty_text = calls[0]
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .any(|c| matches!(c, MessageContent::Text { text } if text.is_empty()));
    assert!(!has_empty_text);
}

#[tokio::test]
async fn propose_operations_parses_and_drops_invalid() {
    let provider = Arc::new(ScriptedProvider::new(vec![terminal_tool_turn(
        "propose_operations",
        json!({"operations": [
            {"kind": "create", "entity_type": "task", "data": {"title": "Buy milk"}},
            {"kind": "update", "entity_type": "task", "id": "t1"}
        ]}),
    )]));
    let engine = engine_with(
        provider,
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let response = engine
        .handle(authed(ChatRequest::new(
            "Add buy milk to my list",
            ChatMode::Action,
        )))
        .await
        .unwrap();

    match response {
        ChatResponse::Actions { operations } => {
            // The update is missing `changes` and gets dropped.
            assert_eq!(operations.len(), 1);
            assert_eq!(operations[0].kind, OperationKind::Create);
        }
        other => panic!("expected Actions, got {:?}", other),
    }
}

#[tokio::test]
async fn ask_questions_parses() {
    let provider = Arc::new(ScriptedProvider::new(vec![terminal_tool_turn(
        "ask_questions",
        json!({"questions": [{"prompt": "Which project?", "options": ["Home", "Work"]}]}),
    )]));
    let engine = engine_with(
        provider,
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let response = engine
        .handle(authed(ChatRequest::new("Move the task", ChatMode::Chat)))
        .await
        .unwrap();

    match response {
        ChatResponse::Questions { questions } => {
            assert_eq!(questions.len(), 1);
            assert_eq!(questions[0].prompt, "Which project?");
        }
        other => panic!("expected Questions, got {:?}", other),
    }
}

#[tokio::test]
async fn mode_params_reach_the_backend() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("ok"), text_turn("ok")]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    engine
        .handle(ChatRequest::new("hi", ChatMode::Chat))
        .await
        .unwrap();
    engine
        .handle(ChatRequest::new("do it", ChatMode::Action))
        .await
        .unwrap();

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls[0].options.temperature_override, Some(0.7));
    assert_eq!(calls[0].options.max_tokens_override, Some(2048));
    assert_eq!(calls[1].options.temperature_override, Some(0.2));
    assert_eq!(calls[1].options.max_tokens_override, Some(4096));

    // Both modes expose all six tools; chat leads terminals with ask_questions.
    assert_eq!(calls[0].tools.len(), 6);
    assert_eq!(calls[0].tools[4].name, "ask_questions");
    assert_eq!(calls[1].tools[4].name, "propose_operations");
}

#[tokio::test]
async fn image_attachment_is_inlined_into_the_transcript() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("A receipt.")]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty().with("uploads/receipt.png", b"fakepng"),
    );

    let mut request = ChatRequest::new("What is this?", ChatMode::Chat);
    request.attachments = vec![FileRef {
        url: "https://files.example.com/uploads/receipt.png".to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 7,
    }];
    engine.handle(request).await.unwrap();

    let calls = provider.calls.lock().unwrap();
    let has_image = calls[0]
        .messages
        .iter()
        .flat_map(|m| m.content.iter())
        .any(|c| matches!(c, MessageContent::Image { .. }));
    assert!(has_image);
}

#[tokio::test]
async fn unresolvable_attachment_fails_before_any_model_call() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("unreachable")]));
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let mut request = ChatRequest::new("What is this?", ChatMode::Chat);
    request.attachments = vec![FileRef {
        url: "https://files.example.com/uploads/gone.png".to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 1,
    }];
    let err = engine.handle(request).await.unwrap_err();

    assert!(matches!(err, EngineError::AttachmentUnresolved { .. }));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn history_is_windowed_and_summary_leads() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_turn("sure")]));
    let mut engine_config_history = Vec::new();
    for i in 0..60 {
        engine_config_history.push(ConversationTurn::user(format!("u{}", i)));
        engine_config_history.push(ConversationTurn::assistant(format!("a{}", i)));
    }
    let engine = engine_with(
        provider.clone(),
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let mut request = ChatRequest::new("and now?", ChatMode::Chat);
    request.history = engine_config_history;
    request.summary = Some("Earlier they set up three projects.".to_string());
    engine.handle(request).await.unwrap();

    let calls = provider.calls.lock().unwrap();
    let messages = &calls[0].messages;
    // Summary turn + 50 windowed turns + current message.
    assert_eq!(messages.len(), 52);
    match &messages[0].content[0] {
        MessageContent::Text { text } => {
            assert!(text.starts_with("Summary of the earlier conversation:"));
        }
        other => panic!("expected text block, got {:?}", other),
    }
    // Oldest windowed turn is u35 (turns 70..120 of 120).
    match &messages[1].content[0] {
        MessageContent::Text { text } => assert_eq!(text, "u35"),
        other => panic!("expected text block, got {:?}", other),
    }
}

#[tokio::test]
async fn usage_accumulates_across_calls() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_turn(vec![("toolu_1", "query_tasks", json!({}))]),
        text_turn("all done"),
    ]));
    let engine = engine_with(
        provider,
        MemoryStore::new("tok-1", vec![]),
        MemoryObjects::empty(),
    );

    let outcome = engine
        .handle_with_usage(authed(ChatRequest::new("tasks?", ChatMode::Chat)))
        .await
        .unwrap();

    assert_eq!(outcome.usage.input_tokens, 20);
    assert_eq!(outcome.usage.output_tokens, 10);
    assert_eq!(outcome.iterations, 1);
}

#[test]
fn chat_response_serializes_with_a_single_tag() {
    let response = ChatResponse::Message {
        text: "hi".to_string(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "message");
    assert_eq!(json["text"], "hi");

    let response = ChatResponse::Actions { operations: vec![] };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "actions");
}
