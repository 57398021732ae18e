//! LLM Provider Trait
//!
//! Defines the common interface for the language-model backend. The engine
//! only ever talks to this trait; the Anthropic client and the scripted test
//! backends are interchangeable behind it.

use async_trait::async_trait;

use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig, ToolDefinition,
};

/// Interface every backend must satisfy.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Model this provider is configured to call.
    fn model(&self) -> &str;

    /// Whether the backend accepts inlined image content blocks.
    fn supports_multimodal(&self) -> bool {
        false
    }

    /// Send a complete transcript and wait for the full response.
    ///
    /// `tools` is the mode's tool set for this request; `request_options`
    /// carries per-request temperature and token overrides.
    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        tools: Vec<ToolDefinition>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse>;

    /// Verify the backend is reachable with the configured credentials.
    async fn health_check(&self) -> LlmResult<()>;

    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Map an HTTP error status from the backend to an `LlmError`
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
