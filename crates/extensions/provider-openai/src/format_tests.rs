use super::*;

fn endpoint() -> EndpointConfig {
    EndpointConfig::new(DEFAULT_API_URL, "test-key")
}

#[test]
fn test_kind_and_default_model() {
    let format = OpenAIFormat::new();
    assert_eq!(format.kind(), WireFormatKind::OpenAi);
    assert_eq!(format.default_model(), "gpt-3.5-turbo");

    let request = format
        .build_request(&CorrectionRequest::new("x"), &endpoint().with_model(""))
        .unwrap();
    assert_eq!(request.body["model"], format.default_model());
}

#[test]
fn test_build_request_headers() {
    let request = OpenAIFormat::new()
        .build_request(&CorrectionRequest::new("This are a test."), &endpoint())
        .unwrap();

    assert_eq!(request.header("Authorization"), Some("Bearer test-key"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert!(request.header("x-api-key").is_none());
}

#[test]
fn test_build_request_body() {
    let request = OpenAIFormat::new()
        .build_request(&CorrectionRequest::new("This are a test."), &endpoint())
        .unwrap();

    let body = &request.body;
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "This are a test.");
}

#[test]
fn test_build_request_custom_model_and_ceiling() {
    let endpoint = endpoint().with_model("gpt-4o-mini");
    let request = OpenAIFormat::new()
        .build_request(&CorrectionRequest::new("x").with_max_tokens(100), &endpoint)
        .unwrap();

    assert_eq!(request.body["model"], "gpt-4o-mini");
    assert_eq!(request.body["max_tokens"], 100);
}

#[test]
fn test_extract_text_keeps_whitespace() {
    let body = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": " This is a test. "}}]
    });
    let text = OpenAIFormat::new().extract_text(&body).unwrap();
    assert_eq!(text, " This is a test. ");
}

#[test]
fn test_extract_text_empty_choices() {
    let body = serde_json::json!({"choices": []});
    let err = OpenAIFormat::new().extract_text(&body).unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}

#[test]
fn test_extract_text_null_content() {
    let body = serde_json::json!({"choices": [{"message": {"content": null}}]});
    let err = OpenAIFormat::new().extract_text(&body).unwrap_err();
    assert!(err.to_string().contains("content"));
}

#[test]
fn test_extract_text_wrong_shape() {
    let body = serde_json::json!({"content": [{"type": "text", "text": "hi"}]});
    let err = OpenAIFormat::new().extract_text(&body).unwrap_err();
    assert!(matches!(err, ServiceError::MalformedResponse(_)));
}
