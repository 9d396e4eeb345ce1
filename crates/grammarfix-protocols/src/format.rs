//! Wire format protocol definitions.
//!
//! A wire format knows how one vendor wants a correction request laid out
//! and where the corrected text lives in the response. HTTP transport is
//! not its concern.

use serde_json::Value;

use crate::endpoint::{EndpointConfig, WireFormatKind};
use crate::error::ServiceError;

/// Instruction fixing the assistant's role to grammar correction.
pub const SYSTEM_PROMPT: &str = "You are a grammar correction assistant. Fix any grammatical errors in the provided text while preserving the original meaning and style. Return only the corrected text without explanations.";

/// Sampling temperature for corrections.
pub const TEMPERATURE: f32 = 0.1;

/// Output ceiling for corrections.
pub const MAX_TOKENS: u32 = 1000;

/// One correction to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionRequest {
    pub text: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CorrectionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Vendor-specific headers and JSON body for one POST.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl ServiceRequest {
    pub fn new(body: Value) -> Self {
        Self {
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Request builder and response reader for one vendor.
pub trait WireFormat: Send + Sync {
    /// Which format this is.
    fn kind(&self) -> WireFormatKind;

    /// Model used when the endpoint names none.
    fn default_model(&self) -> &str;

    /// Lay out headers and body for a correction.
    fn build_request(
        &self,
        request: &CorrectionRequest,
        endpoint: &EndpointConfig,
    ) -> Result<ServiceRequest, ServiceError>;

    /// Pull the corrected text out of a successful response body.
    ///
    /// Returns the text as the vendor sent it; trimming is the caller's job.
    fn extract_text(&self, body: &Value) -> Result<String, ServiceError>;
}
