//! Known vendor defaults.

use std::fmt;
use std::str::FromStr;

/// Endpoint preset the user can apply with one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    OpenAi,
    Anthropic,
    Local,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::OpenAi, Preset::Anthropic, Preset::Local];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Local => "local",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
            Self::Anthropic => "https://api.anthropic.com/v1/messages",
            Self::Local => "http://localhost:1234/v1/chat/completions",
        }
    }

    /// Empty for local servers, which serve whatever model is loaded.
    pub fn model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-3.5-turbo",
            Self::Anthropic => "claude-3-sonnet-20240229",
            Self::Local => "",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset: {} (expected openai, anthropic or local)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        assert_eq!(Preset::OpenAi.url(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(Preset::Anthropic.model(), "claude-3-sonnet-20240229");
        assert_eq!(Preset::Local.model(), "");
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Anthropic".parse::<Preset>(), Ok(Preset::Anthropic));
        assert_eq!("local".parse::<Preset>(), Ok(Preset::Local));
        assert!("azure".parse::<Preset>().is_err());
    }
}
