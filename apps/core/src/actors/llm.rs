use crate::actors::messages::{AppError, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::brain::RoutedRequest;
use crate::config::AppConfig;
use crate::models::CompletionSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info};

/// Extra time the handle waits beyond the HTTP timeout before giving up on the actor.
const REPLY_GRACE: Duration = Duration::from_secs(5);

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    reply_timeout: Duration,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    pub fn new(config: AppConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let reply_timeout = config.request_timeout + REPLY_GRACE;
        let actor = LlmActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn complete(&self, request: RoutedRequest) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::Complete {
            request,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Wire types (OpenAI-compatible chat completions) ---

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl<'a> CompletionRequest<'a> {
    fn new(request: &'a RoutedRequest, settings: &'a CompletionSettings) -> Self {
        Self {
            model: &settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a response body, trimmed.
fn extract_content(body: &str) -> Result<String, AppError> {
    let parsed: CompletionResponse = serde_json::from_str(body)?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::MalformedResponse("response contained no choices".to_string()))?;
    let content = choice.message.content.ok_or_else(|| {
        AppError::MalformedResponse("first choice has no message content".to_string())
    })?;
    Ok(content.trim().to_string())
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    client: Client,
    api_url: String,
    api_key: Option<String>,
    settings: CompletionSettings,
    request_timeout: Duration,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, config: AppConfig) -> Self {
        Self {
            receiver,
            client: Client::new(),
            api_url: config.api_url,
            api_key: config.api_key,
            settings: config.completion,
            request_timeout: config.request_timeout,
        }
    }

    async fn run(mut self) {
        info!(model = %self.settings.model, url = %self.api_url, "LlmActor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        info!("LlmActor stopped");
    }

    fn build_request(&self, payload: &CompletionRequest<'_>) -> reqwest::RequestBuilder {
        let builder = self.client.post(&self.api_url).json(payload);
        match &self.api_key {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_message(&mut self, msg: LlmMessage) {
        match msg {
            LlmMessage::Complete { request, responder } => {
                let result = timeout(self.request_timeout, self.generate_completion(&request))
                    .await
                    .map_err(AppError::from)
                    .and_then(|r| r);
                if let Err(e) = &result {
                    error!("Completion failed: {}", e);
                }
                let _ = responder.send(result);
            }
        }
    }

    async fn generate_completion(&self, request: &RoutedRequest) -> Result<String, AppError> {
        let payload = CompletionRequest::new(request, &self.settings);
        debug!(
            model = payload.model,
            max_tokens = payload.max_tokens,
            "Sending completion request"
        );

        let res = self.build_request(&payload).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(AppError::Completion {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }
}
