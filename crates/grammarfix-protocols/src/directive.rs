//! Directives sent from the coordinator to a page's selection agent.
//!
//! The JSON shape is the cross-process message contract:
//!
//! ```json
//! {"action": "showLoading"}
//! {"action": "showError", "message": "..."}
//! {"action": "replaceText", "originalText": "...", "fixedText": "..."}
//! {"action": "hideNotification"}
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long non-loading notifications stay on screen.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(3);

/// Text shown while a correction is in flight.
pub const LOADING_MESSAGE: &str = "Fixing grammar...";

/// One-way instruction from coordinator to selection agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Directive {
    ShowLoading,
    ShowError {
        message: String,
    },
    ReplaceText {
        original_text: String,
        fixed_text: String,
    },
    HideNotification,
}

impl Directive {
    pub fn show_error(message: impl Into<String>) -> Self {
        Self::ShowError {
            message: message.into(),
        }
    }

    pub fn replace_text(original_text: impl Into<String>, fixed_text: impl Into<String>) -> Self {
        Self::ReplaceText {
            original_text: original_text.into(),
            fixed_text: fixed_text.into(),
        }
    }

    /// Error directives are the only ones worth escalating outside the page.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ShowError { .. })
    }

    /// Wire name of the directive.
    pub fn action(&self) -> &'static str {
        match self {
            Self::ShowLoading => "showLoading",
            Self::ShowError { .. } => "showError",
            Self::ReplaceText { .. } => "replaceText",
            Self::HideNotification => "hideNotification",
        }
    }

    /// Message carried by an error directive.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::ShowError { message } => Some(message),
            _ => None,
        }
    }
}

/// Visual kind of a status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Loading,
    Error,
    Success,
}

impl NotificationKind {
    /// Loading notifications persist until replaced or hidden.
    pub fn is_sticky(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Transient status message shown on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotification {
    pub message: String,
    pub kind: NotificationKind,
}

impl StatusNotification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn loading() -> Self {
        Self::new(LOADING_MESSAGE, NotificationKind::Loading)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    /// Time until the notification disappears on its own, if ever.
    pub fn lifetime(&self) -> Option<Duration> {
        if self.kind.is_sticky() {
            None
        } else {
            Some(AUTO_DISMISS_AFTER)
        }
    }
}

#[cfg(test)]
#[path = "directive_tests.rs"]
mod tests;
