//! # Grammar Fixer Core
//!
//! The background side of a correction cycle:
//!
//! - [`CorrectionClient`] - one HTTP round-trip to the configured LLM endpoint
//! - [`DeliveryLayer`] - best-effort directive delivery with injection and
//!   platform-notification fallbacks
//! - [`Coordinator`] - drives one cycle per command invocation

pub mod client;
pub mod coordinator;
pub mod delivery;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use client::{CorrectionClient, PROBE_TEXT};
pub use coordinator::{Coordinator, CycleOutcome, COMMAND_ID, COMMAND_TITLE};
pub use delivery::{DeliveryLayer, DeliveryReport};
pub use registry::WireFormatRegistry;
