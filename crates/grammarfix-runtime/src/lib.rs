//! # Grammar Fixer Runtime
//!
//! Hosts the extension outside a real browser. [`SimulatedBrowser`] keeps
//! tabs, runs each page's selection agent as its own task and implements the
//! host seams the coordinator talks to. [`ExtensionRuntime`] wires the
//! coordinator, delivery layer and correction client against it.

pub mod browser;
pub mod error;
pub mod notifier;
pub mod page;
pub mod runtime;

pub use browser::SimulatedBrowser;
pub use error::BrowserError;
pub use notifier::LogNotifier;
pub use page::{PageHandle, PageSnapshot};
pub use runtime::{default_formats, ExtensionRuntime, ExtensionRuntimeConfig};
