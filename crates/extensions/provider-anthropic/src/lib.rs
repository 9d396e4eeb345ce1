//! Anthropic wire format for Grammar Fixer.

mod api;
mod format;

pub use format::{AnthropicFormat, API_VERSION, DEFAULT_API_URL, DEFAULT_MODEL};
