//! Process-lifetime registry of report writers.

use crate::reports::{ReportWriter, ResultFormatInfo};
use indexmap::IndexMap;
use std::sync::Arc;

/// Holds one instance per report-writer id, in registration order.
///
/// Registration takes `&mut self`; sharing the registry across threads
/// means wrapping it in a lock, which serializes writers.
#[derive(Default)]
pub struct ReportWriterRegistry {
    writers: IndexMap<&'static str, Arc<dyn ReportWriter>>,
}

impl ReportWriterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a writer. A second writer with the same id is ignored and
    /// `false` is returned.
    pub fn register(&mut self, writer: Arc<dyn ReportWriter>) -> bool {
        let id = writer.id();
        if self.writers.contains_key(id) {
            tracing::debug!("Report writer '{}' already registered", id);
            return false;
        }
        tracing::debug!("Registered report writer '{}'", id);
        self.writers.insert(id, writer);
        true
    }

    /// Writer whose format matches `name` (display name or extension)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ReportWriter>> {
        self.writers
            .values()
            .find(|w| w.format().matches(name))
            .cloned()
    }

    /// Writer by id
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<Arc<dyn ReportWriter>> {
        self.writers.get(id).cloned()
    }

    /// Formats of all registered writers
    #[must_use]
    pub fn formats(&self) -> Vec<ResultFormatInfo> {
        self.writers.values().map(|w| w.format()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ReportWriter>> {
        self.writers.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl std::fmt::Debug for ReportWriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportWriterRegistry")
            .field("writers", &self.writers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{JsonReportWriter, MarkdownReportWriter};

    #[test]
    fn test_single_instance_per_id() {
        let mut registry = ReportWriterRegistry::new();
        assert!(registry.register(Arc::new(JsonReportWriter::new())));
        assert!(!registry.register(Arc::new(JsonReportWriter::new().pretty(false))));
        assert!(registry.register(Arc::new(MarkdownReportWriter::new())));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_by_format() {
        let mut registry = ReportWriterRegistry::new();
        registry.register(Arc::new(MarkdownReportWriter::new()));
        assert!(registry.get("md").is_some());
        assert!(registry.get("Markdown").is_some());
        assert!(registry.get("json").is_none());
        assert_eq!(registry.formats()[0].mime_type, "text/markdown");
    }
}
