use crate::actors::messages::AppError;
use crate::brain::RoutedRequest;
use async_trait::async_trait;

/// Defines the public interface for an LLM (Large Language Model) actor.
///
/// This trait abstracts the specific implementation of the LLM, allowing the
/// HTTP-backed actor and test doubles to be used interchangeably.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Sends the routed request to the completion service and returns the
    /// generated text.
    async fn complete(&self, request: RoutedRequest) -> Result<String, AppError>;
}
