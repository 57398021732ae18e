//! Assistant Engine
//!
//! The public entry point: one `ChatRequest` in, one `ChatResponse` out.
//! Wires the formatter, mode policy, executor and orchestrator together
//! for a single request; no state survives between requests.

use std::sync::Arc;

use taskweave_core::{AuthToken, ChatResponse, ConversationTurn, FileRef};
use taskweave_llm::{LlmProvider, LlmRequestOptions};
use taskweave_tools::{DataStore, ToolExecutor};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::formatter::format_transcript;
use crate::mode::{params_for_mode, tools_for_mode, ChatMode};
use crate::object_store::ObjectStore;
use crate::orchestrator::{LoopOutcome, Orchestrator};

/// One conversation request from the surrounding application
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The user's current message
    pub message: String,
    /// Attachments on the current message
    pub attachments: Vec<FileRef>,
    /// Prior turns, oldest first
    pub history: Vec<ConversationTurn>,
    /// Optional summary replacing turns older than the history window
    pub summary: Option<String>,
    /// Conversation mode for this request
    pub mode: ChatMode,
    /// Credential scoping query tools to the user; absent for anonymous
    /// sessions, in which case query tools return structured errors
    pub auth_token: Option<AuthToken>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            message: message.into(),
            attachments: Vec::new(),
            history: Vec::new(),
            summary: None,
            mode,
            auth_token: None,
        }
    }
}

/// The conversation engine
pub struct AssistantEngine {
    provider: Arc<dyn LlmProvider>,
    data_store: Arc<dyn DataStore>,
    object_store: Arc<dyn ObjectStore>,
    config: EngineConfig,
}

impl AssistantEngine {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        data_store: Arc<dyn DataStore>,
        object_store: Arc<dyn ObjectStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            data_store,
            object_store,
            config,
        }
    }

    /// Handle one request, returning just the response.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, EngineError> {
        self.handle_with_usage(request).await.map(|o| o.response)
    }

    /// Handle one request, returning the response together with accumulated
    /// token usage and the number of tool-dispatch rounds.
    pub async fn handle_with_usage(
        &self,
        request: ChatRequest,
    ) -> Result<LoopOutcome, EngineError> {
        if request.message.trim().is_empty() && request.attachments.is_empty() {
            return Err(EngineError::EmptyMessage);
        }

        let transcript = format_transcript(
            &request.message,
            &request.attachments,
            &request.history,
            request.summary.as_deref(),
            self.config.history_window,
            self.object_store.as_ref(),
        )
        .await?;

        let params = params_for_mode(request.mode);
        let options = LlmRequestOptions {
            temperature_override: Some(params.temperature),
            max_tokens_override: Some(params.max_tokens),
        };

        let executor = ToolExecutor::new(self.data_store.clone());
        let orchestrator = Orchestrator::new(
            self.provider.as_ref(),
            &executor,
            build_system_prompt(request.mode),
            tools_for_mode(request.mode),
            options,
            request.auth_token.as_ref(),
            self.config.max_iterations,
            self.config.max_retries,
            self.config.max_retry_delay_secs,
        );

        orchestrator.run(transcript).await
    }
}

/// Assemble the system prompt for a mode.
pub fn build_system_prompt(mode: ChatMode) -> String {
    let mut parts = vec![
        "You are Taskweave, an assistant for a personal task, note and project manager. \
         You help the user understand and organize their data."
            .to_string(),
        "Use the query tools to look up the user's tasks, notes, projects and files \
         before answering questions about them. Never invent records."
            .to_string(),
    ];

    match mode {
        ChatMode::Chat => parts.push(
            "Answer conversationally. When the user's request is ambiguous, use \
             ask_questions to clarify before doing anything else."
                .to_string(),
        ),
        ChatMode::Action => parts.push(
            "The user wants changes made. Use propose_operations to propose the exact \
             create, update or delete operations; the user confirms before anything is \
             applied. Ask questions only when a required detail is missing."
                .to_string(),
        ),
    }

    parts.join("\n\n")
}
