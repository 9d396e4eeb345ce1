//! Persisted endpoint settings.

use serde::{Deserialize, Serialize};

use grammarfix_protocols::endpoint::{EndpointConfig, WireFormatKind};

use crate::error::ConfigError;
use crate::preset::Preset;

/// Settings as stored: `apiUrl`, `apiKey`, `model`, and an optional `format`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    /// Explicit wire format; inferred from `api_url` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<WireFormatKind>,
}

impl Settings {
    /// Resolve the endpoint for one correction.
    pub fn endpoint(&self) -> Result<EndpointConfig, ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let format = self.format.unwrap_or_else(|| WireFormatKind::infer(url));
        Ok(EndpointConfig::new(url, self.api_key.clone())
            .with_model(self.model.clone())
            .with_format(format))
    }

    /// Fill in a preset's URL and model; the key is left alone.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.api_url = preset.url().to_string();
        self.model = preset.model().to_string();
        self.format = None;
    }

    /// API key with all but the last four characters hidden.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        match chars.len() {
            0 => "(not set)".to_string(),
            n if n <= 4 => "*".repeat(n),
            n => {
                let tail: String = chars[n - 4..].iter().collect();
                format!("{}{}", "*".repeat(n - 4), tail)
            }
        }
    }
}
