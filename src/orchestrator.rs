//! Orchestrator (tool loop)
//!
//! Drives the bounded request/execute/continue cycle against the model:
//! call the model, dispatch any requested tool calls concurrently, feed the
//! results back, and repeat until a terminal turn or the iteration cap.
//! Every tool call id issued in one turn gets exactly one result before the
//! next model call.

use std::time::Duration;

use futures_util::future::join_all;
use taskweave_core::{AuthToken, ChatResponse};
use taskweave_llm::{
    LlmProvider, LlmRequestOptions, LlmResponse, Message, MessageContent, MessageRole, StopReason,
    ToolDefinition, UsageStats,
};
use taskweave_tools::ToolExecutor;

use crate::error::EngineError;
use crate::parser::parse_response;

/// Where the loop stands after inspecting one model turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A model call is in flight or about to be made
    AwaitingModel,
    /// The model requested tools; executors are running
    DispatchingTools,
    /// The model ended its turn; the response is ready to parse
    Terminal,
    /// The iteration cap was hit without a terminal turn
    FailedCap,
    /// The model returned a stop reason the protocol does not allow
    FailedProtocol,
}

impl LoopState {
    /// Transition taken after a model turn with the given stop reason.
    pub fn after_model_turn(stop_reason: &StopReason) -> LoopState {
        match stop_reason {
            StopReason::EndTurn => LoopState::Terminal,
            StopReason::ToolUse => LoopState::DispatchingTools,
            _ => LoopState::FailedProtocol,
        }
    }
}

/// Result of a completed loop
#[derive(Debug)]
pub struct LoopOutcome {
    pub response: ChatResponse,
    /// Token usage accumulated across every model call in the loop
    pub usage: UsageStats,
    /// Tool-dispatch rounds that ran before the terminal turn
    pub iterations: usize,
}

/// One orchestration run. Built fresh per request and discarded after.
pub struct Orchestrator<'a> {
    provider: &'a dyn LlmProvider,
    executor: &'a ToolExecutor,
    system_prompt: String,
    tools: Vec<ToolDefinition>,
    options: LlmRequestOptions,
    auth: Option<&'a AuthToken>,
    max_iterations: usize,
    max_retries: u32,
    max_retry_delay_secs: u64,
}

impl<'a> Orchestrator<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: &'a dyn LlmProvider,
        executor: &'a ToolExecutor,
        system_prompt: String,
        tools: Vec<ToolDefinition>,
        options: LlmRequestOptions,
        auth: Option<&'a AuthToken>,
        max_iterations: usize,
        max_retries: u32,
        max_retry_delay_secs: u64,
    ) -> Self {
        Self {
            provider,
            executor,
            system_prompt,
            tools,
            options,
            auth,
            max_iterations,
            max_retries,
            max_retry_delay_secs,
        }
    }

    /// Run the tool loop to completion over the given transcript.
    ///
    /// The model is called at most `max_iterations + 1` times; in practice a
    /// run that never reaches `end_turn` fails after `max_iterations` calls.
    pub async fn run(&self, mut transcript: Vec<Message>) -> Result<LoopOutcome, EngineError> {
        let mut usage = UsageStats::default();
        let mut iterations = 0usize;
        let mut state = LoopState::AwaitingModel;

        loop {
            tracing::debug!(?state, iterations, "calling model");
            let response = self.call_model_with_retry(&transcript).await?;
            usage.merge(&response.usage);

            state = LoopState::after_model_turn(&response.stop_reason);
            match state {
                LoopState::Terminal => {
                    tracing::debug!(?state, iterations, "loop reached terminal turn");
                    return Ok(LoopOutcome {
                        response: parse_response(&response),
                        usage,
                        iterations,
                    });
                }
                LoopState::DispatchingTools => {
                    if response.tool_calls.is_empty() {
                        return Err(EngineError::Protocol(
                            "tool_use stop reason with no tool calls".to_string(),
                        ));
                    }

                    transcript.push(assistant_turn(&response));
                    transcript.push(self.dispatch_tools(&response).await);

                    iterations += 1;
                    if iterations >= self.max_iterations {
                        state = LoopState::FailedCap;
                        tracing::warn!(?state, iterations, "tool loop hit iteration cap");
                        return Err(EngineError::IterationLimit);
                    }
                    state = LoopState::AwaitingModel;
                }
                _ => {
                    tracing::warn!(?state, stop_reason = ?response.stop_reason, "loop aborted");
                    return Err(EngineError::Protocol(format!(
                        "unexpected stop reason: {:?}",
                        response.stop_reason
                    )));
                }
            }
        }
    }

    /// Dispatch every requested tool call concurrently and collect the
    /// results into one user turn. A failing executor produces an is_error
    /// result for its id only; sibling calls are unaffected.
    async fn dispatch_tools(&self, response: &LlmResponse) -> Message {
        let futures = response.tool_calls.iter().map(|tc| async move {
            tracing::debug!(tool = %tc.name, id = %tc.id, "dispatching tool call");
            let result = self.executor.execute(&tc.name, &tc.arguments, self.auth).await;
            (tc.id.clone(), result)
        });

        let results = join_all(futures).await;

        let content = results
            .into_iter()
            .map(|(id, result)| MessageContent::ToolResult {
                tool_use_id: id,
                content: result.to_content(),
                is_error: if result.success { None } else { Some(true) },
            })
            .collect();

        Message {
            role: MessageRole::User,
            content,
        }
    }

    /// Call the model, retrying transient failures with capped exponential
    /// backoff and honoring server-provided retry-after hints.
    async fn call_model_with_retry(
        &self,
        transcript: &[Message],
    ) -> Result<LlmResponse, EngineError> {
        let mut attempt = 0u32;
        loop {
            let result = self
                .provider
                .send_message(
                    transcript.to_vec(),
                    Some(self.system_prompt.clone()),
                    self.tools.clone(),
                    self.options.clone(),
                )
                .await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    let delay = e
                        .retry_after_secs()
                        .unwrap_or_else(|| (1u64 << attempt).min(self.max_retry_delay_secs));
                    tracing::warn!(attempt, delay_secs = delay, error = %e, "retrying model call");
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn assistant_turn(response: &LlmResponse) -> Message {
    let mut content = Vec::with_capacity(response.tool_calls.len() + 1);
    if let Some(text) = &response.content {
        if !text.is_empty() {
            content.push(MessageContent::Text { text: text.clone() });
        }
    }
    for tc in &response.tool_calls {
        content.push(MessageContent::ToolUse {
            id: tc.id.clone(),
            name: tc.name.clone(),
            input: tc.arguments.clone(),
        });
    }
    Message {
        role: MessageRole::Assistant,
        content,
    }
}
