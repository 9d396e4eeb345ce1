//! Host platform protocol definitions.
//!
//! The host owns tabs and the message channel between the coordinator and
//! the per-page selection agents. Delivery over that channel is never
//! guaranteed; callers must treat every send as fallible.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::directive::Directive;
use crate::error::DeliveryError;

/// Tab unique identifier type.
pub type TabId = u32;

/// URL schemes the host refuses to inject scripts into.
pub const PRIVILEGED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "moz-extension",
    "edge",
    "about",
];

/// Snapshot of a tab as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }

    /// Whether page-level script injection is disallowed for this tab.
    pub fn is_privileged(&self) -> bool {
        is_privileged_url(&self.url)
    }
}

/// Check an address against [`PRIVILEGED_SCHEMES`].
pub fn is_privileged_url(address: &str) -> bool {
    match url::Url::parse(address) {
        Ok(parsed) => PRIVILEGED_SCHEMES.contains(&parsed.scheme()),
        // Unparseable addresses fall back to a plain prefix test.
        Err(_) => {
            let lower = address.trim_start().to_ascii_lowercase();
            PRIVILEGED_SCHEMES
                .iter()
                .any(|scheme| lower.starts_with(&format!("{}:", scheme)))
        }
    }
}

/// Notification rendered by the platform, outside any page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformNotification {
    pub title: String,
    pub message: String,
}

impl PlatformNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Tab lookup, messaging and agent injection.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Look up a tab by id.
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, DeliveryError>;

    /// Send a directive to the tab's live selection agent.
    async fn send_message(&self, tab_id: TabId, directive: &Directive) -> Result<(), DeliveryError>;

    /// Inject the selection agent program into the tab.
    async fn inject_agent(&self, tab_id: TabId) -> Result<(), DeliveryError>;
}

/// Platform-level notification surface.
#[async_trait]
pub trait PlatformNotifier: Send + Sync {
    async fn notify(&self, notification: PlatformNotification) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_schemes() {
        for address in [
            "chrome://settings",
            "chrome-extension://abcdef/popup.html",
            "moz-extension://1234/page.html",
            "edge://flags",
            "about:blank",
            "ABOUT:config",
        ] {
            assert!(is_privileged_url(address), "{address} should be privileged");
        }
    }

    #[test]
    fn test_ordinary_pages() {
        for address in [
            "https://example.com/about:blank",
            "http://localhost:8080/",
            "file:///tmp/page.html",
            "https://chrome.google.com/",
        ] {
            assert!(!is_privileged_url(address), "{address} should be ordinary");
        }
    }

    #[test]
    fn test_unparseable_falls_back_to_prefix() {
        assert!(is_privileged_url("  about:"));
        assert!(!is_privileged_url("not a url"));
    }

    #[test]
    fn test_tab_info_privileged() {
        assert!(TabInfo::new(1, "chrome://newtab").is_privileged());
        assert!(!TabInfo::new(2, "https://example.com").is_privileged());
    }
}
