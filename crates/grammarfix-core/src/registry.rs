//! Wire format registry.

use dashmap::DashMap;
use std::sync::Arc;

use grammarfix_protocols::endpoint::WireFormatKind;
use grammarfix_protocols::format::WireFormat;

/// Registry of wire formats, keyed by kind.
pub struct WireFormatRegistry {
    formats: DashMap<WireFormatKind, Arc<dyn WireFormat>>,
}

impl WireFormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            formats: DashMap::new(),
        }
    }

    /// Register a format, returning the one it replaced.
    pub fn register(&self, format: Arc<dyn WireFormat>) -> Option<Arc<dyn WireFormat>> {
        let kind = format.kind();
        let previous = self.formats.insert(kind, format);
        if previous.is_some() {
            tracing::debug!(%kind, "Replaced wire format");
        }
        previous
    }

    /// Get a format by kind.
    pub fn get(&self, kind: WireFormatKind) -> Option<Arc<dyn WireFormat>> {
        self.formats.get(&kind).map(|f| f.clone())
    }

    /// List registered kinds.
    pub fn kinds(&self) -> Vec<WireFormatKind> {
        self.formats.iter().map(|entry| *entry.key()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for WireFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
