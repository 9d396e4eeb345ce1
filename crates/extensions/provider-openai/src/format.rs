//! OpenAI wire format implementation.

use serde_json::Value;

use grammarfix_protocols::endpoint::{EndpointConfig, WireFormatKind};
use grammarfix_protocols::error::ServiceError;
use grammarfix_protocols::format::{CorrectionRequest, ServiceRequest, WireFormat, SYSTEM_PROMPT};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI-compatible chat completions format.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAIFormat;

impl OpenAIFormat {
    pub fn new() -> Self {
        Self
    }

    fn build_api_request(&self, request: &CorrectionRequest, endpoint: &EndpointConfig) -> ApiRequest {
        ApiRequest {
            model: endpoint.model_or(self.default_model()).to_string(),
            messages: vec![ApiMessage::system(SYSTEM_PROMPT), ApiMessage::user(&request.text)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

impl WireFormat for OpenAIFormat {
    fn kind(&self) -> WireFormatKind {
        WireFormatKind::OpenAi
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    fn build_request(
        &self,
        request: &CorrectionRequest,
        endpoint: &EndpointConfig,
    ) -> Result<ServiceRequest, ServiceError> {
        let api_request = self.build_api_request(request, endpoint);
        let body = serde_json::to_value(&api_request)
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

        Ok(ServiceRequest::new(body)
            .with_header("Authorization", format!("Bearer {}", endpoint.api_key)))
    }

    fn extract_text(&self, body: &Value) -> Result<String, ServiceError> {
        let response: ApiResponse = serde_json::from_value(body.clone())
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ServiceError::MalformedResponse("response has no choices".to_string())
        })?;

        tracing::debug!(finish_reason = ?choice.finish_reason, "OpenAI choice received");

        choice.message.content.ok_or_else(|| {
            ServiceError::MalformedResponse("choices[0].message.content is missing".to_string())
        })
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
