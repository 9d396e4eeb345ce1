//! # Grammar Fixer Config
//!
//! Persistent endpoint settings (`apiUrl`, `apiKey`, `model`, `format`),
//! the stores that hold them, and the vendor presets offered to the user.

mod error;
mod loader;
mod preset;
mod settings;
mod store;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use preset::Preset;
pub use settings::Settings;
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
