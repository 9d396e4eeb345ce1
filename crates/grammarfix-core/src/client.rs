//! Correction service client.

use std::sync::Arc;

use serde_json::Value;

use grammarfix_protocols::endpoint::EndpointConfig;
use grammarfix_protocols::error::ServiceError;
use grammarfix_protocols::format::{CorrectionRequest, ServiceRequest};

use crate::registry::WireFormatRegistry;

/// Sentence sent by the connection probe.
pub const PROBE_TEXT: &str = "This are a test sentence with grammar error.";

/// Output ceiling for the connection probe.
const PROBE_MAX_TOKENS: u32 = 100;

/// Characters of the probe reply echoed back to the user.
const PROBE_PREVIEW_CHARS: usize = 50;

/// Stateless correction client. Each call is exactly one POST.
#[derive(Clone)]
pub struct CorrectionClient {
    client: reqwest::Client,
    formats: Arc<WireFormatRegistry>,
}

impl CorrectionClient {
    pub fn new(formats: Arc<WireFormatRegistry>) -> Self {
        Self::with_http_client(reqwest::Client::new(), formats)
    }

    /// Use a preconfigured HTTP client (proxies, custom TLS).
    pub fn with_http_client(client: reqwest::Client, formats: Arc<WireFormatRegistry>) -> Self {
        Self { client, formats }
    }

    /// Correct `text` against `endpoint`, returning the trimmed result.
    pub async fn correct(&self, text: &str, endpoint: &EndpointConfig) -> Result<String, ServiceError> {
        self.complete(&CorrectionRequest::new(text), endpoint).await
    }

    /// Check an endpoint with one short correction.
    ///
    /// Returns the start of the reply. Errors carry the raw error body via
    /// [`ServiceError::detailed`].
    pub async fn probe(&self, endpoint: &EndpointConfig) -> Result<String, ServiceError> {
        if !endpoint.is_configured() || endpoint.api_key.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Please enter API URL and key first".to_string(),
            ));
        }

        let request = CorrectionRequest::new(PROBE_TEXT).with_max_tokens(PROBE_MAX_TOKENS);
        let reply = self.complete(&request, endpoint).await?;
        Ok(reply.chars().take(PROBE_PREVIEW_CHARS).collect())
    }

    async fn complete(
        &self,
        request: &CorrectionRequest,
        endpoint: &EndpointConfig,
    ) -> Result<String, ServiceError> {
        let format = self
            .formats
            .get(endpoint.format)
            .ok_or_else(|| ServiceError::UnknownFormat(endpoint.format.to_string()))?;

        let service_request = format.build_request(request, endpoint)?;
        tracing::debug!(
            url = %endpoint.url,
            format = %endpoint.format,
            chars = request.text.chars().count(),
            "Sending correction request"
        );

        let body = self.send_request(&endpoint.url, service_request).await?;
        let text = format.extract_text(&body)?;
        Ok(text.trim().to_string())
    }

    async fn send_request(&self, url: &str, request: ServiceRequest) -> Result<Value, ServiceError> {
        let mut builder = self.client.post(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .json(&request.body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Correction endpoint returned an error");
            return Err(ServiceError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                body,
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
