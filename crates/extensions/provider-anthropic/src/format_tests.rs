use super::*;

fn endpoint() -> EndpointConfig {
    EndpointConfig::new(DEFAULT_API_URL, "test-key")
}

#[test]
fn test_kind_and_default_model() {
    let format = AnthropicFormat::new();
    assert_eq!(format.kind(), WireFormatKind::Anthropic);
    assert_eq!(format.default_model(), "claude-3-sonnet-20240229");

    let request = format
        .build_request(&CorrectionRequest::new("x"), &endpoint().with_model(""))
        .unwrap();
    assert_eq!(request.body["model"], format.default_model());
}

#[test]
fn test_api_constants() {
    assert_eq!(DEFAULT_API_URL, "https://api.anthropic.com/v1/messages");
    assert_eq!(API_VERSION, "2023-06-01");
}

#[test]
fn test_build_request_headers() {
    let request = AnthropicFormat::new()
        .build_request(&CorrectionRequest::new("Me and him goes."), &endpoint())
        .unwrap();

    assert_eq!(request.header("x-api-key"), Some("test-key"));
    assert_eq!(request.header("anthropic-version"), Some("2023-06-01"));
    assert!(request.header("authorization").is_none());
}

#[test]
fn test_build_request_body() {
    let request = AnthropicFormat::new()
        .build_request(&CorrectionRequest::new("Me and him goes."), &endpoint())
        .unwrap();

    let body = &request.body;
    assert_eq!(body["model"], "claude-3-sonnet-20240229");
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["system"], SYSTEM_PROMPT);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Me and him goes.");
    assert!(body["temperature"].as_f64().unwrap() < 0.11);
}

#[test]
fn test_build_request_custom_model() {
    let endpoint = endpoint().with_model("claude-3-5-haiku-latest");
    let request = AnthropicFormat::new()
        .build_request(&CorrectionRequest::new("x"), &endpoint)
        .unwrap();
    assert_eq!(request.body["model"], "claude-3-5-haiku-latest");
}

#[test]
fn test_extract_text() {
    let body = serde_json::json!({
        "id": "msg_01",
        "content": [{"type": "text", "text": "\nHe and I go.\n"}],
        "stop_reason": "end_turn"
    });
    let text = AnthropicFormat::new().extract_text(&body).unwrap();
    assert_eq!(text, "\nHe and I go.\n");
}

#[test]
fn test_extract_text_skips_non_text_blocks() {
    let body = serde_json::json!({
        "content": [
            {"type": "thinking", "thinking": "subject-verb agreement"},
            {"type": "text", "text": "He and I go."}
        ]
    });
    let text = AnthropicFormat::new().extract_text(&body).unwrap();
    assert_eq!(text, "He and I go.");
}

#[test]
fn test_extract_text_empty_content() {
    let body = serde_json::json!({"content": []});
    let err = AnthropicFormat::new().extract_text(&body).unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[test]
fn test_extract_text_openai_shape_rejected() {
    let body = serde_json::json!({"choices": [{"message": {"content": "hi"}}]});
    let err = AnthropicFormat::new().extract_text(&body).unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}
