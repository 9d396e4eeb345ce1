//! Simulated browser errors.

use thiserror::Error;

use grammarfix_protocols::error::DeliveryError;
use grammarfix_protocols::host::TabId;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Page in tab {0} has no running agent")]
    PageClosed(TabId),

    #[error("Command not registered: {0}")]
    UnknownCommand(String),

    #[error("Cannot run scripts on privileged page {0}")]
    Privileged(String),
}

impl BrowserError {
    /// Recast as the error a [`TabHost`](grammarfix_protocols::host::TabHost) caller sees.
    pub fn into_delivery(self, tab_id: TabId) -> DeliveryError {
        match self {
            Self::TabNotFound(id) => DeliveryError::TabNotFound(id),
            Self::PageClosed(_) => DeliveryError::AgentUnavailable {
                tab_id,
                reason: "Could not establish connection. Receiving end does not exist.".to_string(),
            },
            Self::Privileged(reason) | Self::UnknownCommand(reason) => {
                DeliveryError::InjectionFailed { tab_id, reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_closed_maps_to_agent_unavailable() {
        let err = BrowserError::PageClosed(4).into_delivery(4);
        assert!(matches!(err, DeliveryError::AgentUnavailable { tab_id: 4, .. }));
        assert!(err.to_string().contains("Receiving end does not exist"));
    }

    #[test]
    fn test_privileged_maps_to_injection_failed() {
        let err = BrowserError::Privileged("chrome://settings".to_string()).into_delivery(9);
        assert!(matches!(err, DeliveryError::InjectionFailed { tab_id: 9, .. }));
    }
}
