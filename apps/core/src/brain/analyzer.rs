//! Intent Router - orchestrates normalization, classification and prompt
//! selection for a single user message.

use chrono::Utc;
use std::time::Instant;
use tracing::debug;

use super::context_packet::{RoutedRequest, RoutingPacket};
use super::intent::classify_detailed;
use super::normalizer::normalize;
use super::prompts::prompt_for;

/// Router that turns raw user text into a completion request.
///
/// Stateless: the keyword and prompt tables are static, so one router can be
/// shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a query and produce a routing packet
    pub fn analyze(&self, query: &str) -> RoutingPacket {
        let start = Instant::now();

        let cleaned = normalize(query);
        let intent = classify_detailed(&cleaned);

        let packet = RoutingPacket {
            query: query.to_string(),
            cleaned,
            intent,
            processing_time_us: start.elapsed().as_micros() as u64,
            timestamp: Utc::now(),
        };
        debug!("{}", packet.summary());
        packet
    }

    /// Pair the system prompt for the analyzed category with the raw message.
    pub fn request_for(&self, packet: &RoutingPacket) -> RoutedRequest {
        RoutedRequest {
            system_prompt: prompt_for(packet.category()).to_string(),
            user_message: packet.query.clone(),
        }
    }

    /// Build the completion request for a raw user message.
    #[allow(dead_code)]
    pub fn build_request(&self, user_message: &str) -> RoutedRequest {
        let packet = self.analyze(user_message);
        self.request_for(&packet)
    }
}

/// Convenience wrapper around [`IntentRouter::build_request`].
#[allow(dead_code)]
pub fn build_request(user_message: &str) -> RoutedRequest {
    IntentRouter::new().build_request(user_message)
}
