//! Per-page selection agent.

use grammarfix_protocols::directive::{Directive, StatusNotification};
use grammarfix_protocols::error::ReplacementError;

use crate::capture::{Anchor, SelectionCapture};
use crate::dom::{char_slice, Document, NodeId, Range};
use crate::notification::NotificationSlot;

/// Page-resident handler for coordinator directives.
///
/// Holds the last captured selection and the page's notification. One agent
/// serves one document for the life of the page.
#[derive(Debug, Default)]
pub struct SelectionAgent {
    capture: Option<SelectionCapture>,
    notification: NotificationSlot,
}

impl SelectionAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&self) -> Option<&SelectionCapture> {
        self.capture.as_ref()
    }

    pub fn notification(&self) -> &NotificationSlot {
        &self.notification
    }

    /// Record the selection as the context menu opens.
    ///
    /// With nothing selected at all the previous capture survives. A
    /// collapsed selection replaces it with nothing, since it has no text to
    /// correct.
    pub fn on_context_menu(&mut self, doc: &Document) {
        if doc.focused_control().is_none() && doc.selection().is_none() {
            return;
        }
        self.capture = SelectionCapture::from_document(doc);
        tracing::debug!(
            captured = self.capture.is_some(),
            chars = self.capture.as_ref().map(|c| c.text.chars().count()).unwrap_or(0),
            "Context menu opened"
        );
    }

    /// Act on one directive from the coordinator.
    pub fn handle(&mut self, doc: &mut Document, directive: &Directive) {
        tracing::debug!(action = directive.action(), "Directive received");
        match directive {
            Directive::ShowLoading => self.notification.show(StatusNotification::loading()),
            Directive::ShowError { message } => {
                self.notification.show(StatusNotification::error(message.clone()))
            }
            Directive::ReplaceText {
                original_text,
                fixed_text,
            } => {
                // Hide the loading notice first so a replacement error stays visible.
                self.notification.hide();
                self.replace_selection(doc, original_text, fixed_text);
            }
            Directive::HideNotification => self.notification.hide(),
        }
    }

    /// Swap the captured selection for `fixed_text`.
    ///
    /// The capture is consumed on success. Failures surface as an error
    /// notification and leave the capture in place.
    pub fn replace_selection(&mut self, doc: &mut Document, original_text: &str, fixed_text: &str) {
        let Some(capture) = self.capture.clone() else {
            tracing::warn!("{}", ReplacementError::NoCapture);
            return;
        };
        if capture.text != original_text {
            tracing::debug!(
                captured = %capture.text,
                requested = %original_text,
                "Replacing a capture that differs from the corrected text"
            );
        }

        match apply(doc, &capture.anchor, fixed_text) {
            Ok(()) => {
                tracing::info!(chars = fixed_text.chars().count(), "Selection replaced");
                self.capture = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error replacing text");
                self.notification
                    .show(StatusNotification::error(format!("Error replacing text: {}", e)));
            }
        }
    }
}

/// Restore the captured selection, then replace in whatever holds focus.
fn apply(doc: &mut Document, anchor: &Anchor, fixed_text: &str) -> Result<(), ReplacementError> {
    restore(doc, anchor)?;
    match (doc.focused_control(), *anchor) {
        (Some(control), _) => replace_in_control(doc, control, fixed_text),
        (None, Anchor::Range(range)) => replace_in_content(doc, range, fixed_text),
        (None, Anchor::Control { node, .. }) => Err(ReplacementError::StaleRange(format!(
            "text control {} cannot take focus",
            node
        ))),
    }
}

/// Make the anchor the active selection again.
fn restore(doc: &mut Document, anchor: &Anchor) -> Result<(), ReplacementError> {
    match *anchor {
        Anchor::Range(range) => {
            doc.validate_range(&range)?;
            doc.select(range);
        }
        Anchor::Control { node, start, end } => {
            if !doc.is_attached(node) {
                return Err(ReplacementError::StaleRange(format!(
                    "text control {} was removed",
                    node
                )));
            }
            let len = match doc.control_value(node) {
                Some(value) => value.chars().count(),
                None => {
                    return Err(ReplacementError::UnsupportedBoundary(format!(
                        "node {} is not a text control",
                        node
                    )));
                }
            };
            if start > end || end > len {
                return Err(ReplacementError::StaleRange(format!(
                    "selection {}..{} is outside the control value ({} chars)",
                    start, end, len
                )));
            }
            doc.focus(node);
            doc.set_control_selection(node, start, end);
        }
    }
    Ok(())
}

/// Replace the control's current selection and fire `input`.
fn replace_in_control(doc: &mut Document, node: NodeId, fixed_text: &str) -> Result<(), ReplacementError> {
    let (value, (start, end)) = match (doc.control_value(node), doc.control_selection(node)) {
        (Some(value), Some(selection)) => (value.to_string(), selection),
        _ => {
            return Err(ReplacementError::UnsupportedBoundary(format!(
                "node {} is not a text control",
                node
            )));
        }
    };
    let len = value.chars().count();

    let updated = format!(
        "{}{}{}",
        char_slice(&value, 0, start),
        fixed_text,
        char_slice(&value, end, len)
    );
    doc.set_control_value(node, &updated);

    let cursor = start + fixed_text.chars().count();
    doc.set_control_selection(node, cursor, cursor);
    doc.dispatch_input(node);
    Ok(())
}

fn replace_in_content(doc: &mut Document, range: Range, fixed_text: &str) -> Result<(), ReplacementError> {
    let at = doc.delete_contents(&range)?;
    let inserted = doc.insert_text_at(at, fixed_text)?;
    doc.collapse_after(inserted)?;
    Ok(())
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
