//! LlmProvider trait definition.

use miyabi_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for the hosted chat completion backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// implementation lives in miyabi-infra (`OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (for logging).
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
