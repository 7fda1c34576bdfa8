//! Explicit table of report-writer modules known to this build.
//!
//! A module stands in for one installable report binary: discovery finds the
//! file on disk, and the manifest maps its simple name to the code that
//! constructs its writers.

use crate::error::{OfflineError, PluginErrorKind, Result};
use crate::reports::{JsonReportWriter, MarkdownReportWriter, ReportWriter};
use std::sync::Arc;

/// Simple-name prefix shared by report plugin binaries.
pub const REPORTS_PREFIX: &str = "Microsoft.Fx.Portability.Reports.";

/// A unit of report-writer code, addressed by simple name.
pub trait PluginModule: Send + Sync {
    /// File name without extension, e.g. `Microsoft.Fx.Portability.Reports.Json`
    fn simple_name(&self) -> &str;

    /// Construct every report writer the module provides
    fn report_writers(&self) -> Result<Vec<Arc<dyn ReportWriter>>>;
}

/// Constructs the writers of a [`StaticPluginModule`].
pub type WriterFactory = fn() -> Result<Vec<Arc<dyn ReportWriter>>>;

/// A module backed by a plain factory function.
pub struct StaticPluginModule {
    simple_name: String,
    factory: WriterFactory,
}

impl StaticPluginModule {
    pub fn new(simple_name: impl Into<String>, factory: WriterFactory) -> Self {
        Self {
            simple_name: simple_name.into(),
            factory,
        }
    }
}

impl PluginModule for StaticPluginModule {
    fn simple_name(&self) -> &str {
        &self.simple_name
    }

    fn report_writers(&self) -> Result<Vec<Arc<dyn ReportWriter>>> {
        (self.factory)()
    }
}

fn json_writers() -> Result<Vec<Arc<dyn ReportWriter>>> {
    Ok(vec![Arc::new(JsonReportWriter::new())])
}

fn markdown_writers() -> Result<Vec<Arc<dyn ReportWriter>>> {
    Ok(vec![Arc::new(MarkdownReportWriter::new())])
}

/// The set of modules discovery can load.
#[derive(Default)]
pub struct PluginManifest {
    modules: Vec<Box<dyn PluginModule>>,
}

impl PluginManifest {
    /// An empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The report modules compiled into this build
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with(StaticPluginModule::new(
                format!("{REPORTS_PREFIX}Json"),
                json_writers,
            ))
            .with(StaticPluginModule::new(
                format!("{REPORTS_PREFIX}Markdown"),
                markdown_writers,
            ))
    }

    /// Add a module, builder style
    #[must_use]
    pub fn with(mut self, module: impl PluginModule + 'static) -> Self {
        self.register(module);
        self
    }

    /// Add a module
    pub fn register(&mut self, module: impl PluginModule + 'static) {
        self.modules.push(Box::new(module));
    }

    /// Resolve a module by simple name, ASCII case-insensitively
    pub fn load(&self, simple_name: &str) -> Result<&dyn PluginModule> {
        self.modules
            .iter()
            .find(|m| m.simple_name().eq_ignore_ascii_case(simple_name))
            .map(AsRef::as_ref)
            .ok_or_else(|| {
                OfflineError::plugin(
                    simple_name,
                    PluginErrorKind::UnknownModule(simple_name.to_string()),
                )
            })
    }

    /// Simple names of all modules
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.simple_name()).collect()
    }
}

impl std::fmt::Debug for PluginManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManifest")
            .field("modules", &self.module_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_modules() {
        let manifest = PluginManifest::builtin();
        let json = manifest
            .load("microsoft.fx.portability.reports.json")
            .expect("json module");
        let writers = json.report_writers().expect("writers");
        assert_eq!(writers.len(), 1);
        assert_eq!(writers[0].id(), "json");
    }

    #[test]
    fn test_unknown_module() {
        let manifest = PluginManifest::builtin();
        match manifest.load("Microsoft.Fx.Portability.Reports.Excel") {
            Err(OfflineError::Plugin {
                source: PluginErrorKind::UnknownModule(name),
                ..
            }) => assert_eq!(name, "Microsoft.Fx.Portability.Reports.Excel"),
            other => panic!("expected unknown module, got {:?}", other.map(|m| m.simple_name().to_string())),
        }
    }
}
