//! # Grammar Fixer Protocols
//!
//! Shared definitions for the Grammar Fixer workspace.
//! Contains only types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`WireFormat`] - Request/response shape of one LLM vendor
//! - [`TabHost`] - Page lookup, messaging and agent injection
//! - [`PlatformNotifier`] - Notifications rendered outside the page
//! - [`CommandSurface`] - Registration of the user-invocable command

pub mod command;
pub mod directive;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod host;

pub use command::{CommandContext, CommandInvocation, CommandSpec, CommandSurface};
pub use directive::{Directive, NotificationKind, StatusNotification};
pub use endpoint::{EndpointConfig, WireFormatKind};
pub use error::{DeliveryError, ReplacementError, ServiceError};
pub use format::{CorrectionRequest, ServiceRequest, WireFormat};
pub use host::{PlatformNotification, PlatformNotifier, TabHost, TabId, TabInfo};
