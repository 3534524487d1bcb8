//! Integration Tests
//!
//! End-to-end turns: raw message through the router, the HTTP LLM actor and a
//! mock completion server, back into the supervisor's transcript.

use crate::actors::supervisor::{SupervisorHandle, ERROR_MARKER};
use crate::brain::{prompt_for, Category};
use crate::config::AppConfig;
use crate::models::{ChatTurn, Speaker};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fixtures
// ============================================================================

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        api_key: Some("integration-key".to_string()),
        api_url: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        request_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    }
}

fn reply_body(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

/// Mount a mock that answers only when the system prompt and raw message match.
async fn expect_turn(server: &MockServer, category: Category, user_message: &str, reply: &str) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": prompt_for(category)},
                {"role": "user", "content": user_message}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(reply)))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Workflows
// ============================================================================

#[tokio::test]
async fn test_multi_turn_conversation_routes_each_message() {
    let server = MockServer::start().await;
    expect_turn(
        &server,
        Category::Phishing,
        "How can I detect a Phishing email?!",
        "Look at the sender address.",
    )
    .await;
    expect_turn(
        &server,
        Category::Network,
        "Is WPA2 enough for my home WiFi?",
        "Prefer WPA3 where available.",
    )
    .await;
    expect_turn(&server, Category::General, "Thanks a lot", "You're welcome!").await;

    let supervisor = SupervisorHandle::new(config_for(&server));

    let first = supervisor
        .process_message("How can I detect a Phishing email?!".to_string())
        .await;
    let second = supervisor
        .process_message("Is WPA2 enough for my home WiFi?".to_string())
        .await;
    let third = supervisor.process_message("Thanks a lot".to_string()).await;

    assert_eq!(first, "Look at the sender address.");
    assert_eq!(second, "Prefer WPA3 where available.");
    assert_eq!(third, "You're welcome!");

    let transcript = supervisor.transcript().await.unwrap();
    assert_eq!(
        transcript,
        vec![
            ChatTurn::user("How can I detect a Phishing email?!"),
            ChatTurn::bot("Look at the sender address."),
            ChatTurn::user("Is WPA2 enough for my home WiFi?"),
            ChatTurn::bot("Prefer WPA3 where available."),
            ChatTurn::user("Thanks a lot"),
            ChatTurn::bot("You're welcome!"),
        ]
    );
}

#[tokio::test]
async fn test_http_error_becomes_error_turn_and_session_continues() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_partial_json(json!({
            "messages": [{"role": "system", "content": prompt_for(Category::Malware)}]
        })))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .expect(1)
        .mount(&server)
        .await;
    expect_turn(&server, Category::Password, "Is a password manager safe?", "Yes.").await;

    let supervisor = SupervisorHandle::new(config_for(&server));

    let failed = supervisor
        .process_message("I think I have a virus".to_string())
        .await;
    assert!(failed.starts_with(ERROR_MARKER), "got: {}", failed);
    assert!(failed.contains("503"));
    assert!(failed.contains("model overloaded"));

    let ok = supervisor
        .process_message("Is a password manager safe?".to_string())
        .await;
    assert_eq!(ok, "Yes.");

    let transcript = supervisor.transcript().await.unwrap();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[1].speaker, Speaker::Bot);
    assert!(transcript[1].text.starts_with(ERROR_MARKER));
    assert_eq!(transcript[3].text, "Yes.");
}

#[tokio::test]
async fn test_malformed_bodies_become_error_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let supervisor = SupervisorHandle::new(config_for(&server));

    let no_choices = supervisor.process_message("hello".to_string()).await;
    assert!(no_choices.starts_with(ERROR_MARKER));
    assert!(no_choices.contains("no choices"));

    let not_json = supervisor.process_message("hello again".to_string()).await;
    assert!(not_json.starts_with(ERROR_MARKER));
    assert!(not_json.contains("Malformed completion response"));
}

#[tokio::test]
async fn test_unreachable_service_becomes_error_turn() {
    let config = AppConfig {
        api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
        request_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    };

    let supervisor = SupervisorHandle::new(config);
    let reply = supervisor
        .process_message("Is my firewall configured?".to_string())
        .await;

    assert!(reply.starts_with(ERROR_MARKER), "got: {}", reply);
    let transcript = supervisor.transcript().await.unwrap();
    assert_eq!(transcript[0].text, "Is my firewall configured?");
}
