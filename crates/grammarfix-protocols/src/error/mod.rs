//! Error types for the Grammar Fixer protocol layer.

mod delivery;
mod replacement;
mod service;

pub use delivery::*;
pub use replacement::*;
pub use service::*;
