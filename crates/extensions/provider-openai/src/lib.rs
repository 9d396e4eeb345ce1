//! OpenAI-compatible wire format for Grammar Fixer.
//!
//! Covers OpenAI itself and the many local servers and proxies that expose
//! `/v1/chat/completions`.

mod api;
mod format;

pub use format::{OpenAIFormat, DEFAULT_API_URL, DEFAULT_MODEL};
