//! # Grammar Fixer Agent
//!
//! The page side of a correction cycle. A [`SelectionAgent`] lives in each
//! ordinary page, remembers the selection at the moment the context menu
//! opens, renders one status notification, and swaps the selection for the
//! corrected text when told to.
//!
//! Pages are modelled by [`Document`], a small DOM: elements, text nodes,
//! text controls, focus, one selection range and a record of dispatched
//! events. Agent state is explicit per page; handlers take the document by
//! reference.

pub mod agent;
pub mod capture;
pub mod dom;
pub mod notification;

pub use agent::SelectionAgent;
pub use capture::{Anchor, SelectionCapture};
pub use dom::{Boundary, ControlKind, Document, DomEvent, NodeId, NodeKind, Range};
pub use notification::NotificationSlot;
