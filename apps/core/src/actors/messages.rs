use tokio::sync::oneshot;

use crate::brain::RoutedRequest;
use crate::models::ChatTurn;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request to generate a complete text response.
    Complete {
        request: RoutedRequest,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A request to run one user turn end to end.
    ProcessUserMessage {
        content: String,
        /// A channel to send the reply (or the formatted error) back.
        responder: oneshot::Sender<String>,
    },
    /// A request for a snapshot of the session transcript.
    GetTranscript {
        responder: oneshot::Sender<Vec<ChatTurn>>,
    },
    /// A command to shut down the supervisor.
    Shutdown,
}
