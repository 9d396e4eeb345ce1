//! Settings file loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::settings::Settings;

/// Settings loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load settings from a string.
    pub fn load_str(content: &str) -> Result<Settings, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let settings: Settings = toml::from_str(&expanded)?;
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(settings: &Settings) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(settings)?)
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Lets a settings file say `apiKey = "${OPENAI_API_KEY}"`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "pattern".to_string(),
            message: e.to_string(),
        })?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// `<config dir>/grammarfix/settings.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grammarfix").join("settings.toml"))
    }
}
