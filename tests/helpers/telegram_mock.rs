//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Message id used for the pinned data message
pub const PINNED_MESSAGE_ID: i32 = 7;

/// Message id returned for newly sent messages
pub const SENT_MESSAGE_ID: i32 = 123;

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot talking to this server instead of api.telegram.org
    pub fn bot(&self) -> Bot {
        let url = reqwest_url(&self.server.uri());
        Bot::new(test_bot_token()).set_api_url(url)
    }

    /// Setup mock for getChat, optionally with a pinned text message
    pub async fn mock_get_chat(&self, pinned_text: Option<&str>) {
        let mut chat = chat_full_info_json();
        if let Some(text) = pinned_text {
            chat["pinned_message"] = message_json(PINNED_MESSAGE_ID, text);
        }

        self.mount_ok("getChat", chat).await;
    }

    /// Setup getChat to fail with an API error
    pub async fn mock_get_chat_failure(&self) {
        let response = ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        }));

        Mock::given(method("POST"))
            .and(path_regex(endpoint_pattern("getChat")))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self) {
        self.mount_ok("sendMessage", message_json(SENT_MESSAGE_ID, "Test message")).await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self) {
        let mut message = message_json(PINNED_MESSAGE_ID, "Edited test message");
        message["edit_date"] = json!(1640995260);
        self.mount_ok("editMessageText", message).await;
    }

    /// Setup mock for pinChatMessage endpoint
    pub async fn mock_pin_chat_message(&self) {
        self.mount_ok("pinChatMessage", json!(true)).await;
    }

    /// Setup every endpoint the pinned store uses
    pub async fn setup_default_mocks(&self, pinned_text: Option<&str>) {
        self.mock_get_chat(pinned_text).await;
        self.mock_send_message().await;
        self.mock_edit_message_text().await;
        self.mock_pin_chat_message().await;
    }

    /// JSON bodies of all requests sent to `endpoint`
    pub async fn request_bodies(&self, endpoint: &str) -> Vec<Value> {
        let endpoint = endpoint.to_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&format!("/{}", endpoint)))
            .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let matching_requests = self.request_bodies(endpoint).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }

    async fn mount_ok(&self, endpoint: &str, result: Value) {
        let response = ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": result
        }));

        Mock::given(method("POST"))
            .and(path_regex(endpoint_pattern(endpoint)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Telegram method names are case-insensitive
fn endpoint_pattern(endpoint: &str) -> String {
    format!(r"(?i)^/bot[^/]+/{}$", endpoint)
}

fn reqwest_url(uri: &str) -> url::Url {
    url::Url::parse(uri).expect("mock server uri is a valid url")
}

fn chat_json() -> Value {
    json!({
        "id": test_chat_id(),
        "title": "Test Group",
        "type": "supergroup"
    })
}

fn chat_full_info_json() -> Value {
    let mut chat = chat_json();
    chat["accent_color_id"] = json!(0);
    chat["max_reaction_count"] = json!(11);
    chat
}

/// A text message in the test chat sent by the bot
pub fn message_json(message_id: i32, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": chat_json(),
        "date": 1640995200,
        "text": text
    })
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Helper function to create test chat ID
pub fn test_chat_id() -> i64 {
    -1001234567890
}
