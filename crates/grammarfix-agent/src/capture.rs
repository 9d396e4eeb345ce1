//! Selection captured when the context menu opens.

use crate::dom::{Document, NodeId, Range};

/// Where captured text lives in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A range over ordinary page content.
    Range(Range),
    /// A span of a text control's value, in characters.
    Control { node: NodeId, start: usize, end: usize },
}

/// Text and position of the most recent non-empty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCapture {
    pub text: String,
    pub anchor: Anchor,
}

impl SelectionCapture {
    /// Snapshot the document's current selection.
    ///
    /// A focused text control wins over the page selection. Returns `None`
    /// for collapsed or empty selections.
    pub fn from_document(doc: &Document) -> Option<Self> {
        if let Some(node) = doc.focused_control() {
            let (start, end) = doc.control_selection(node)?;
            if start == end {
                return None;
            }
            return Some(Self {
                text: doc.selection_text(),
                anchor: Anchor::Control { node, start, end },
            });
        }

        let range = doc.selection()?;
        if range.is_collapsed() {
            return None;
        }
        let text = doc.range_text(&range).ok()?;
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            anchor: Anchor::Range(range),
        })
    }
}
