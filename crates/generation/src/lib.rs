//! Client for the external text-generation service.
//!
//! - [`TextGenerator`] -- the seam the API depends on; tests substitute a
//!   scripted implementation.
//! - [`client::ChatCompletionClient`] -- the production implementation over
//!   a chat-completion style HTTP endpoint.
//! - [`prompts`] -- request builders for each AI-backed operation.
//! - [`parse`] -- strict extraction of JSON payloads from completions.

use async_trait::async_trait;
use serde::Serialize;

pub mod client;
pub mod error;
pub mod parse;
pub mod prompts;

pub use client::ChatCompletionClient;
pub use error::GenerationError;

/// One chat message sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A generation request: system prompt, conversation, and token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// The text of a completion and the tokens it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub total_tokens: i32,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError>;
}
