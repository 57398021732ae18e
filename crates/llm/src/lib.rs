//! Taskweave LLM
//!
//! Wire types and the provider abstraction for the language-model backend
//! driving the conversation engine. The shipped implementation speaks the
//! Anthropic messages API; tests and alternative backends implement the same
//! `LlmProvider` trait.

pub mod anthropic;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use provider::{missing_api_key_error, parse_http_error, LlmProvider};
pub use types::*;
