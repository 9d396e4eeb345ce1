//! Endpoint configuration for one correction request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Request/response shape spoken by an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireFormatKind {
    /// `choices[0].message.content`, bearer auth.
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// `content[0].text`, `x-api-key` auth plus version header.
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl WireFormatKind {
    /// Guess the format from an endpoint URL.
    ///
    /// Anything mentioning `anthropic` speaks the Anthropic shape; every other
    /// endpoint (OpenAI, local servers, proxies) is treated as OpenAI-compatible.
    pub fn infer(url: &str) -> Self {
        if url.to_ascii_lowercase().contains("anthropic") {
            Self::Anthropic
        } else {
            Self::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for WireFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(format!("unknown wire format: {}", other)),
        }
    }
}

/// Everything needed to reach one LLM endpoint.
///
/// Supplied whole for each correction and never mutated while a request is
/// in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default)]
    pub format: WireFormatKind,
}

impl EndpointConfig {
    /// Create a config, inferring the wire format from the URL.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let url = url.into();
        let format = WireFormatKind::infer(&url);
        Self {
            url,
            api_key: api_key.into(),
            model_name: None,
            format,
        }
    }

    /// Set the model. Blank names mean "use the vendor default".
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model_name = if model.trim().is_empty() {
            None
        } else {
            Some(model)
        };
        self
    }

    pub fn with_format(mut self, format: WireFormatKind) -> Self {
        self.format = format;
        self
    }

    /// Model to request, falling back to the vendor default.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model_name.as_deref().unwrap_or(default)
    }

    /// Whether an endpoint URL is present at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
