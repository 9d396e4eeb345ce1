//! Anthropic wire format implementation.

use serde_json::Value;

use grammarfix_protocols::endpoint::{EndpointConfig, WireFormatKind};
use grammarfix_protocols::error::ServiceError;
use grammarfix_protocols::format::{CorrectionRequest, ServiceRequest, WireFormat, SYSTEM_PROMPT};

use crate::api::{ApiMessage, ApiRequest, ApiResponse, ContentBlock};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const API_VERSION: &str = "2023-06-01";

/// Anthropic messages API format.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnthropicFormat;

impl AnthropicFormat {
    pub fn new() -> Self {
        Self
    }

    fn build_api_request(&self, request: &CorrectionRequest, endpoint: &EndpointConfig) -> ApiRequest {
        ApiRequest {
            model: endpoint.model_or(self.default_model()).to_string(),
            max_tokens: request.max_tokens,
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.text.clone(),
            }],
            temperature: Some(request.temperature),
        }
    }
}

impl WireFormat for AnthropicFormat {
    fn kind(&self) -> WireFormatKind {
        WireFormatKind::Anthropic
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
            .with_header("x-api-key", endpoint.api_key.clone())
            .with_header("anthropic-version", API_VERSION))
    }

    fn extract_text(&self, body: &Value) -> Result<String, ServiceError> {
        let response: ApiResponse = serde_json::from_value(body.clone())
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        tracing::debug!(stop_reason = ?response.stop_reason, "Anthropic message received");

        // Non-text blocks (e.g. thinking) may precede the answer.
        response
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or_else(|| ServiceError::MalformedResponse("response has no text content".to_string()))
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
