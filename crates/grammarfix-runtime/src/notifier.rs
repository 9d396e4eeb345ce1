//! Platform notifications rendered as log lines.

use async_trait::async_trait;
use parking_lot::Mutex;

use grammarfix_protocols::error::DeliveryError;
use grammarfix_protocols::host::{PlatformNotification, PlatformNotifier};

/// Most recent notifications kept for display.
pub const SHOWN_LIMIT: usize = 64;

/// Writes each notification to the log and keeps it for later display.
#[derive(Default)]
pub struct LogNotifier {
    shown: Mutex<Vec<PlatformNotification>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<PlatformNotification> {
        self.shown.lock().clone()
    }
}

#[async_trait]
impl PlatformNotifier for LogNotifier {
    async fn notify(&self, notification: PlatformNotification) -> Result<(), DeliveryError> {
        tracing::warn!(
            title = %notification.title,
            message = %notification.message,
            "Platform notification"
        );
        let mut shown = self.shown.lock();
        while shown.len() >= SHOWN_LIMIT {
            shown.remove(0);
        }
        shown.push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notifications_are_kept_in_order() {
        let notifier = LogNotifier::new();
        notifier
            .notify(PlatformNotification::new("Grammar Fixer Error", "first"))
            .await
            .unwrap();
        notifier
            .notify(PlatformNotification::new("Grammar Fixer", "second"))
            .await
            .unwrap();

        let shown = notifier.shown();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].message, "first");
        assert_eq!(shown[1].title, "Grammar Fixer");
    }

    #[tokio::test]
    async fn test_only_recent_notifications_are_kept() {
        let notifier = LogNotifier::new();
        for i in 0..SHOWN_LIMIT + 3 {
            notifier
                .notify(PlatformNotification::new("Grammar Fixer Error", format!("failure {}", i)))
                .await
                .unwrap();
        }

        let shown = notifier.shown();
        assert_eq!(shown.len(), SHOWN_LIMIT);
        assert_eq!(shown[0].message, "failure 3");
    }
}
