//! # Brain Module
//!
//! Fast, rule-based routing for the security chatbot.
//! Analyzes user input BEFORE calling the LLM to pick a system prompt.
//!
//! ## Components
//! - `normalizer`: lowercase, punctuation stripping, stopword removal
//! - `intent`: keyword-table classification into a `Category`
//! - `prompts`: category to system prompt
//! - `context_packet`: output data structures
//! - `analyzer`: `IntentRouter` orchestrator

pub mod analyzer;
pub mod context_packet;
pub mod intent;
pub mod normalizer;
pub mod prompts;

// Re-export main types for convenience
pub use analyzer::IntentRouter;
pub use context_packet::RoutedRequest;
#[allow(unused_imports)]
pub use analyzer::build_request;
#[allow(unused_imports)]
pub use context_packet::RoutingPacket;
#[allow(unused_imports)]
pub use intent::{classify, classify_detailed, Category, IntentResult};
#[allow(unused_imports)]
pub use normalizer::normalize;
#[allow(unused_imports)]
pub use prompts::prompt_for;
