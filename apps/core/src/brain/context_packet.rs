//! Routing output structures.
//!
//! `RoutedRequest` is what goes to the completion service. `RoutingPacket` is
//! the diagnostic record of one routing pass.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::intent::{Category, IntentResult};

/// System prompt plus the user's message exactly as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedRequest {
    /// Persona prompt chosen by the router
    pub system_prompt: String,
    /// Raw user message, never normalized
    pub user_message: String,
}

/// Complete record of a routing pass
#[derive(Debug, Clone, Serialize)]
pub struct RoutingPacket {
    /// Original user query
    pub query: String,

    /// Lowercased, punctuation-free, stopword-free form of the query
    pub cleaned: String,

    /// Detected category and the keyword that selected it
    pub intent: IntentResult,

    /// Processing time in microseconds
    pub processing_time_us: u64,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl RoutingPacket {
    /// Routed category
    pub fn category(&self) -> Category {
        self.intent.category
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Category: {} (keyword: {}), Cleaned: \"{}\", Took: {}us",
            self.intent.category,
            self.intent.matched_keyword.unwrap_or("none"),
            self.cleaned,
            self.processing_time_us
        )
    }
}
