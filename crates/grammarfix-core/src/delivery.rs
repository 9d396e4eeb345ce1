//! Best-effort directive delivery.
//!
//! Pages may not have a live selection agent (the agent was installed after
//! the page loaded, or the page navigated). That is an ordinary condition:
//! delivery falls back to injecting the agent and retrying once, and error
//! directives finally escalate to a platform notification. Nothing here
//! ever fails toward the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use grammarfix_protocols::directive::Directive;
use grammarfix_protocols::error::DeliveryError;
use grammarfix_protocols::host::{PlatformNotification, PlatformNotifier, TabHost, TabId};

/// Wait after injection before retrying, so the agent can register its handlers.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Title for notifications about pages the agent can never run in.
pub const NOTIFICATION_TITLE: &str = "Grammar Fixer";

/// Title for notifications after recovery failed.
pub const ERROR_NOTIFICATION_TITLE: &str = "Grammar Fixer Error";

/// How a delivery attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryReport {
    /// The live agent accepted the directive.
    Delivered,
    /// Accepted after injecting the agent.
    DeliveredAfterInjection,
    /// The page was unreachable; an error went to a platform notification.
    NotifiedPlatform,
    /// The page was unreachable and the directive was discarded.
    Dropped,
}

/// Delivers directives to pages through the host.
pub struct DeliveryLayer {
    host: Arc<dyn TabHost>,
    notifier: Arc<dyn PlatformNotifier>,
    settle_delay: Duration,
}

impl DeliveryLayer {
    pub fn new(host: Arc<dyn TabHost>, notifier: Arc<dyn PlatformNotifier>) -> Self {
        Self {
            host,
            notifier,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Deliver `directive` to the agent in `tab_id`.
    pub async fn deliver(&self, tab_id: TabId, directive: &Directive) -> DeliveryReport {
        let tab = match self.host.get_tab(tab_id).await {
            Ok(tab) => tab,
            Err(e) => {
                warn!(tab_id, error = %e, "Cannot resolve tab");
                return self.fall_back(directive, ERROR_NOTIFICATION_TITLE).await;
            }
        };

        if tab.is_privileged() {
            warn!(tab_id, url = %tab.url, "Cannot inject agent into restricted page");
            return self.fall_back(directive, NOTIFICATION_TITLE).await;
        }

        match self.host.send_message(tab_id, directive).await {
            Ok(()) => {
                debug!(tab_id, action = directive.action(), "Directive delivered");
                return DeliveryReport::Delivered;
            }
            Err(e) => warn!(tab_id, error = %e, "Failed to send directive to agent"),
        }

        match self.recover(tab_id, directive).await {
            Ok(()) => {
                debug!(tab_id, action = directive.action(), "Directive delivered after injection");
                DeliveryReport::DeliveredAfterInjection
            }
            Err(e) => {
                error!(tab_id, error = %e, "Failed to inject agent");
                self.fall_back(directive, ERROR_NOTIFICATION_TITLE).await
            }
        }
    }

    /// Inject the agent, let it settle, and retry exactly once.
    async fn recover(&self, tab_id: TabId, directive: &Directive) -> Result<(), DeliveryError> {
        self.host.inject_agent(tab_id).await?;
        tokio::time::sleep(self.settle_delay).await;
        self.host.send_message(tab_id, directive).await
    }

    async fn fall_back(&self, directive: &Directive, title: &str) -> DeliveryReport {
        let Some(message) = directive.error_message() else {
            debug!(action = directive.action(), "Dropping undeliverable directive");
            return DeliveryReport::Dropped;
        };

        match self
            .notifier
            .notify(PlatformNotification::new(title, message))
            .await
        {
            Ok(()) => DeliveryReport::NotifiedPlatform,
            Err(e) => {
                error!(error = %e, "Platform notification failed");
                DeliveryReport::Dropped
            }
        }
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
