use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use travel_multiverse::{
    ChatMessage, CompletionRequest, CompletionService, OpenAIClient, TravelError,
};

fn client_for(server: &mockito::Server) -> OpenAIClient {
    OpenAIClient::new("sk-test")
        .with_base_url(format!("{}/v1", server.url()))
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_instruction_request_returns_first_output_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4.1-mini",
            "input": "Plan something"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "resp_1",
                "error": null,
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{ "type": "output_text", "text": "{\"destinations\":[]}" }]
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let text = client_for(&server)
        .complete(CompletionRequest::instruction("gpt-4.1-mini", "Plan something"))
        .await
        .unwrap();

    assert_eq!(text, "{\"destinations\":[]}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_messages_are_sent_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4.1",
            "input": [
                { "role": "system", "content": "rules" },
                { "role": "user", "content": "trip" }
            ]
        })))
        .with_status(200)
        .with_body(json!({ "output": [{ "content": [{ "text": "{}" }] }] }).to_string())
        .create_async()
        .await;

    let text = client_for(&server)
        .complete(CompletionRequest::messages(
            "gpt-4.1",
            vec![ChatMessage::system("rules"), ChatMessage::user("trip")],
        ))
        .await
        .unwrap();

    assert_eq!(text, "{}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_output_is_empty_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_body(json!({ "output": [] }).to_string())
        .create_async()
        .await;

    let text = client_for(&server)
        .complete(CompletionRequest::instruction("gpt-4.1-mini", "hi"))
        .await
        .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(429)
        .with_header("retry-after", "1")
        .with_body(json!({ "error": { "message": "Rate limit reached" } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::instruction("gpt-4.1-mini", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, TravelError::Completion(_)));
    assert!(err.to_string().contains("Rate limit reached"));
    assert!(err.is_generation_failure());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .with_status(502)
        .with_body("bad gateway")
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::instruction("gpt-4.1-mini", "hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("bad gateway"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_object_in_success_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/responses")
        .with_status(200)
        .with_body(json!({ "error": { "message": "model overloaded" }, "output": [] }).to_string())
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::instruction("gpt-4.1-mini", "hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("model overloaded"));
}
