use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default Together AI model.
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Sampling parameters sent with every completion request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
pub struct CompletionSettings {
    /// The model identifier passed to the completion API.
    #[validate(length(min = 1))]
    pub model: String,
    /// Upper bound on generated tokens.
    #[validate(range(min = 1))]
    pub max_tokens: u32,
    /// Controls the creativity of the model's responses. Value between 0.0 and 2.0.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    /// Nucleus sampling cutoff. Value between 0.0 and 1.0.
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: f32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.5,
            top_p: 0.9,
        }
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    /// Marker printed in front of the turn text.
    pub fn marker(&self) -> &'static str {
        match self {
            Speaker::User => "🧑",
            Speaker::Bot => "🤖",
        }
    }
}

/// One message exchanged in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}
