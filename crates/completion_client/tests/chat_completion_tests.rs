//! HTTP behavior of the chat-completions client against a mock endpoint.

use chat_core::{GenerationOptions, Message};
use completion_client::{ChatClient, CompletionError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_transcript() -> Vec<Message> {
    vec![
        Message::system("You are a helpful assistant."),
        Message::user("Say hello."),
    ]
}

fn options() -> GenerationOptions {
    GenerationOptions::new(0.5, 120).unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
}

#[tokio::test]
async fn test_complete_returns_reply_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello there!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let reply = client.complete(&sample_transcript(), options()).await.unwrap();

    assert_eq!(reply, "Hello there!");
}

#[tokio::test]
async fn test_request_carries_transcript_order_and_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-nano-2025-04-14",
            "temperature": 0.5,
            "max_tokens": 120,
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Say hello."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hi.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    client.complete(&sample_transcript(), options()).await.unwrap();
}

#[tokio::test]
async fn test_bearer_auth_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hi.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    client.complete(&sample_transcript(), options()).await.unwrap();
}

#[tokio::test]
async fn test_api_error_keeps_status_and_body_and_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let result = client.complete(&sample_transcript(), options()).await;

    match result {
        Err(CompletionError::Api { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("upstream unavailable"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_status_surfaces_as_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "tokens"}
            })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let result = client.complete(&sample_transcript(), options()).await;

    match result {
        Err(CompletionError::Api { status, .. }) => assert_eq!(status.as_u16(), 429),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let result = client.complete(&sample_transcript(), options()).await;

    assert!(matches!(result, Err(CompletionError::Json(_))));
}

#[tokio::test]
async fn test_empty_choices_is_a_typed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let result = client.complete(&sample_transcript(), options()).await;

    assert!(matches!(result, Err(CompletionError::EmptyCompletion)));
}

#[tokio::test]
async fn test_null_content_is_a_typed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": null}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new("test-key").with_base_url(mock_server.uri());
    let result = client.complete(&sample_transcript(), options()).await;

    assert!(matches!(result, Err(CompletionError::EmptyCompletion)));
}
