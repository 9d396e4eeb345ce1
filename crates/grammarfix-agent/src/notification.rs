//! The page's single status notification.

use tokio::time::Instant;

use grammarfix_protocols::directive::StatusNotification;

/// Most recent notifications kept in the history.
pub const HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone)]
struct Shown {
    notification: StatusNotification,
    expires_at: Option<Instant>,
}

/// At most one notification is visible; showing a new one replaces the old.
///
/// Expiry is evaluated lazily against the tokio clock, so a paused test
/// clock controls when a notification disappears.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Shown>,
    history: Vec<StatusNotification>,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, notification: StatusNotification) {
        let expires_at = notification.lifetime().map(|lifetime| Instant::now() + lifetime);
        tracing::debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "Showing notification"
        );
        while self.history.len() >= HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(notification.clone());
        self.current = Some(Shown {
            notification,
            expires_at,
        });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    /// The visible notification, if any.
    pub fn current(&self) -> Option<&StatusNotification> {
        let shown = self.current.as_ref()?;
        match shown.expires_at {
            Some(deadline) if Instant::now() >= deadline => None,
            _ => Some(&shown.notification),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current().is_some()
    }

    /// The last [`HISTORY_LIMIT`] notifications shown, oldest first.
    pub fn history(&self) -> &[StatusNotification] {
        &self.history
    }
}
