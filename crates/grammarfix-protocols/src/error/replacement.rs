//! Replacement errors raised inside a page.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplacementError {
    #[error("No selection range available")]
    NoCapture,

    #[error("Selection is no longer valid: {0}")]
    StaleRange(String),

    #[error("Unsupported selection boundary: {0}")]
    UnsupportedBoundary(String),
}
