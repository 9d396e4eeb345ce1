//! Delivery errors.
//!
//! Never surfaced to the user directly; the delivery layer recovers from
//! every variant locally.

use thiserror::Error;

use crate::host::TabId;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("No selection agent in tab {tab_id}: {reason}")]
    AgentUnavailable { tab_id: TabId, reason: String },

    #[error("Cannot inject agent into tab {tab_id}: {reason}")]
    InjectionFailed { tab_id: TabId, reason: String },

    #[error("Notification failed: {0}")]
    NotificationFailed(String),
}
