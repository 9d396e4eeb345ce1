use super::*;

#[test]
fn test_api_request_serialization() {
    let request = ApiRequest {
        model: "gpt-3.5-turbo".to_string(),
        messages: vec![ApiMessage::system("Be terse"), ApiMessage::user("Hello")],
        temperature: 0.1,
        max_tokens: 1000,
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "gpt-3.5-turbo");
    assert_eq!(json["max_tokens"], 1000);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(json["messages"][1]["content"], "Hello");
    // f32 0.1 widens to roughly 0.1
    let temperature = json["temperature"].as_f64().unwrap();
    assert!(temperature > 0.09 && temperature < 0.11);
}

#[test]
fn test_api_response_deserialization() {
    let json = serde_json::json!({
        "id": "chatcmpl-123",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Fixed."},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
    });

    let response: ApiResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.id.as_deref(), Some("chatcmpl-123"));
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0].message.content.as_deref(), Some("Fixed."));
}

#[test]
fn test_api_response_minimal_local_server() {
    // Local servers often omit id, model and index.
    let json = serde_json::json!({
        "choices": [{"message": {"content": "ok"}}]
    });

    let response: ApiResponse = serde_json::from_value(json).unwrap();
    assert!(response.id.is_none());
    assert_eq!(response.choices[0].index, 0);
    assert!(response.choices[0].message.role.is_none());
}

#[test]
fn test_api_response_without_choices_fails() {
    let json = serde_json::json!({"error": {"message": "nope"}});
    assert!(serde_json::from_value::<ApiResponse>(json).is_err());
}
