use crate::actors::llm::LlmActorHandle;
use crate::actors::messages::{AppError, SupervisorMessage};
use crate::actors::traits::LlmActor;
use crate::brain::IntentRouter;
use crate::config::AppConfig;
use crate::models::ChatTurn;
use crate::session::ChatSession;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, instrument};

/// Prefix of every reply produced from a failed completion call.
pub const ERROR_MARKER: &str = "❌ Error:";

/// Turn an error into the reply text shown to the user.
pub fn format_error_reply(err: &AppError) -> String {
    format!("{} {}", ERROR_MARKER, err)
}

/// A handle to the `SupervisorActor`.
///
/// This is the primary entry point for all business logic in the application. It
/// routes each user message, calls the `LlmActor` and records the exchange in
/// the session transcript it owns.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Creates a new `SupervisorActor` backed by an HTTP `LlmActor` and returns a handle.
    pub fn new(config: AppConfig) -> Self {
        Self::with_llm(Arc::new(LlmActorHandle::new(config)))
    }

    /// Creates a new `SupervisorActor` around any `LlmActor` implementation.
    pub fn with_llm<L>(llm_actor: Arc<L>) -> Self
    where
        L: LlmActor,
    {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SupervisorRunner::new(receiver, llm_actor);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Processes one user message.
    ///
    /// 1. Routes the message to a system prompt.
    /// 2. Sends the raw message and the prompt to the completion service.
    /// 3. Records the user turn and the reply in the transcript.
    ///
    /// Always returns reply text: failures come back as an `❌ Error:` string.
    #[instrument(skip(self, content))]
    pub async fn process_message(&self, content: String) -> String {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::ProcessUserMessage {
            content,
            responder: send,
        };
        if let Err(e) = self.sender.send(msg).await {
            return format_error_reply(&AppError::Actor(e.to_string()));
        }
        match recv.await {
            Ok(reply) => reply,
            Err(e) => format_error_reply(&AppError::Actor(e.to_string())),
        }
    }

    /// Returns a snapshot of the session transcript.
    pub async fn transcript(&self) -> Result<Vec<ChatTurn>, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(SupervisorMessage::GetTranscript { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        recv.await.map_err(|e| AppError::Actor(e.to_string()))
    }

    /// Stops the supervisor. Later calls on any clone of the handle fail.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(SupervisorMessage::Shutdown).await;
    }
}

// --- Actor Runner ---
struct SupervisorRunner<L>
where
    L: LlmActor,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    llm_actor: Arc<L>,
    router: IntentRouter,
    session: ChatSession,
}

impl<L> SupervisorRunner<L>
where
    L: LlmActor,
{
    fn new(receiver: mpsc::Receiver<SupervisorMessage>, llm_actor: Arc<L>) -> Self {
        Self {
            receiver,
            llm_actor,
            router: IntentRouter::new(),
            session: ChatSession::new(),
        }
    }

    async fn run(mut self) {
        info!(
            session = %self.session.id(),
            created_at = %self.session.created_at(),
            "Supervisor started"
        );
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorMessage::ProcessUserMessage { content, responder } => {
                    let reply = self.handle_user_message(content).await;
                    let _ = responder.send(reply);
                }
                SupervisorMessage::GetTranscript { responder } => {
                    let _ = responder.send(self.session.turns().to_vec());
                }
                SupervisorMessage::Shutdown => {
                    info!("Supervisor shutting down...");
                    break;
                }
            }
        }
        info!(turns = self.session.len(), "Supervisor stopped");
    }

    #[instrument(skip(self, content), fields(session = %self.session.id()))]
    async fn handle_user_message(&mut self, content: String) -> String {
        let packet = self.router.analyze(&content);
        info!(
            category = %packet.category(),
            keyword = packet.intent.matched_keyword.unwrap_or("-"),
            "Routed user message"
        );
        let request = self.router.request_for(&packet);

        let reply = match self.llm_actor.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Error processing user message: {:?}", e);
                format_error_reply(&e)
            }
        };

        self.session.record_exchange(&content, &reply);
        reply
    }
}
