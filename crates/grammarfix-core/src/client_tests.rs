use super::*;
use crate::test_support::formats;
use grammarfix_protocols::endpoint::WireFormatKind;
use grammarfix_protocols::format::SYSTEM_PROMPT;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn client() -> CorrectionClient {
    CorrectionClient::new(formats())
}

fn openai_endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig::new(format!("{}/v1/chat/completions", server.uri()), "k")
        .with_model("gpt-3.5-turbo")
        .with_format(WireFormatKind::OpenAi)
}

fn anthropic_endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig::new(format!("{}/v1/messages", server.uri()), "ak")
        .with_format(WireFormatKind::Anthropic)
}

#[tokio::test]
async fn test_openai_correction_is_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/chat/completions"))
        .and(matchers::header("authorization", "Bearer k"))
        .and(matchers::body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 1000,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": "This are a test."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": " This is a test. "}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fixed = client()
        .correct("This are a test.", &openai_endpoint(&mock_server))
        .await
        .unwrap();
    assert_eq!(fixed, "This is a test.");
}

#[tokio::test]
async fn test_newlines_are_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "\n\nFixed text.\n"}}]
        })))
        .mount(&mock_server)
        .await;

    let fixed = client()
        .correct("fixed text", &openai_endpoint(&mock_server))
        .await
        .unwrap();
    assert_eq!(fixed, "Fixed text.");
}

#[tokio::test]
async fn test_anthropic_correction() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::header("x-api-key", "ak"))
        .and(matchers::header("anthropic-version", "2023-06-01"))
        .and(matchers::body_partial_json(serde_json::json!({
            "model": "claude-3-sonnet-20240229",
            "system": SYSTEM_PROMPT
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "msg_01",
            "content": [{"type": "text", "text": "He doesn't know.\n"}],
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fixed = client()
        .correct("He don't know.", &anthropic_endpoint(&mock_server))
        .await
        .unwrap();
    assert_eq!(fixed, "He doesn't know.");
}

#[tokio::test]
async fn test_unauthorized_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":{"message":"Incorrect API key"}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client()
        .correct("text", &openai_endpoint(&mock_server))
        .await
        .unwrap_err();

    match &err {
        ServiceError::Api {
            status,
            status_text,
            body,
        } => {
            assert_eq!(*status, 401);
            assert_eq!(status_text, "Unauthorized");
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "API request failed: 401 Unauthorized");
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = client()
        .correct("text", &anthropic_endpoint(&mock_server))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.detailed().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&mock_server)
        .await;

    let err = client()
        .correct("text", &openai_endpoint(&mock_server))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_wrong_vendor_shape_is_malformed() {
    let mock_server = MockServer::start().await;

    // Anthropic-shaped reply to an OpenAI-format request.
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "hi"}]
        })))
        .mount(&mock_server)
        .await;

    let err = client()
        .correct("text", &openai_endpoint(&mock_server))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on port 1.
    let endpoint = EndpointConfig::new("http://127.0.0.1:1/v1/chat/completions", "k");

    let err = client().correct("text", &endpoint).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn test_unregistered_format() {
    let client = CorrectionClient::new(Arc::new(WireFormatRegistry::new()));
    let endpoint = EndpointConfig::new("http://127.0.0.1:9/v1/chat/completions", "k");

    let err = client.correct("text", &endpoint).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownFormat(kind) if kind == "openai"));
}

#[tokio::test]
async fn test_probe_sends_short_request() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::body_partial_json(serde_json::json!({
            "max_tokens": 100,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": PROBE_TEXT}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content":
                "This is a test sentence with a grammar error. It has been fixed carefully."}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let preview = client().probe(&openai_endpoint(&mock_server)).await.unwrap();
    assert_eq!(preview.chars().count(), 50);
    assert!(preview.starts_with("This is a test sentence"));
}

#[tokio::test]
async fn test_probe_requires_key() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let endpoint = EndpointConfig::new(mock_server.uri(), "  ");
    let err = client().probe(&endpoint).await.unwrap_err();
    assert!(err.to_string().contains("API URL and key"));
}

#[tokio::test]
async fn test_probe_error_includes_body() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&mock_server)
        .await;

    let err = client().probe(&openai_endpoint(&mock_server)).await.unwrap_err();
    assert_eq!(err.detailed(), "404 Not Found: model not found");
}
