pub mod mock;
pub mod openai;

use async_trait::async_trait;

use crate::config::Sampling;
use crate::error::GenerationError;

/// One chat completion: a system instruction, a user instruction, and how to sample.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub sampling: Sampling,
}

/// The text-generation service. OpenAI in production, a script in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}
