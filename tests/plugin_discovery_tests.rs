//! Report plugin discovery against real directories.

use apiport_offline::plugins::{
    discover_report_writers, report_plugin_candidates, DiscoveryOptions, PluginManifest,
    ReportWriterRegistry, StaticPluginModule,
};
use apiport_offline::reports::{JsonReportWriter, MarkdownReportWriter, ReportError};
use apiport_offline::{PortabilityReport, ReportWriter, ResultFormatInfo};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"MZ").unwrap();
}

/// Stand-in for a writer shipped in a generated companion binary.
struct ViewsWriter;

impl ReportWriter for ViewsWriter {
    fn id(&self) -> &'static str {
        "views"
    }

    fn format(&self) -> ResultFormatInfo {
        ResultFormatInfo::new("views", "text/html", ".html")
    }

    fn write_report(&self, _: &PortabilityReport, _: &mut dyn Write) -> Result<(), ReportError> {
        Ok(())
    }
}

fn discover(dir: &Path, manifest: &PluginManifest) -> ReportWriterRegistry {
    let mut registry = ReportWriterRegistry::new();
    discover_report_writers(dir, &DiscoveryOptions::default(), manifest, &mut registry);
    registry
}

#[test]
fn builtin_writers_found_next_to_application() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Json.dll");
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Markdown.dll");
    touch(dir.path(), "Microsoft.Fx.Portability.dll");

    let registry = discover(dir.path(), &PluginManifest::builtin());
    let names: Vec<String> = registry
        .formats()
        .into_iter()
        .map(|f| f.display_name)
        .collect();
    assert_eq!(names, vec!["json", "markdown"]);
}

#[test]
fn no_candidates_means_empty_registry() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "Contoso.Reports.Json.dll");

    assert!(discover(dir.path(), &PluginManifest::builtin()).is_empty());
}

#[test]
fn companion_with_primary_is_skipped_but_orphan_is_loaded() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Foo.dll");
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Foo.views.dll");
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Bar.views.dll");

    let candidates = report_plugin_candidates(dir.path(), &DiscoveryOptions::default());
    assert_eq!(candidates.len(), 3);

    let manifest = PluginManifest::new()
        .with(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Foo",
            || Ok(vec![Arc::new(JsonReportWriter::new()) as Arc<dyn ReportWriter>]),
        ))
        .with(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Foo.views",
            || Ok(vec![Arc::new(ViewsWriter) as Arc<dyn ReportWriter>]),
        ))
        .with(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Bar.views",
            || Ok(vec![Arc::new(MarkdownReportWriter::new()) as Arc<dyn ReportWriter>]),
        ));

    let registry = discover(dir.path(), &manifest);
    assert_eq!(registry.len(), 2);
    assert!(registry.by_id("json").is_some());
    assert!(registry.by_id("markdown").is_some());
    assert!(registry.by_id("views").is_none());
}

#[test]
fn duplicate_writer_ids_register_once() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Json.dll");
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.JsonCompact.dll");

    let manifest = PluginManifest::builtin().with(StaticPluginModule::new(
        "Microsoft.Fx.Portability.Reports.JsonCompact",
        || Ok(vec![Arc::new(JsonReportWriter::new().pretty(false)) as Arc<dyn ReportWriter>]),
    ));

    let registry = discover(dir.path(), &manifest);
    assert_eq!(registry.len(), 1);
}

#[test]
fn custom_extension_from_options() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Json.so");
    touch(dir.path(), "Microsoft.Fx.Portability.Reports.Markdown.dll");

    let options = DiscoveryOptions {
        extension: ".so".to_string(),
        companion_suffix: ".views.so".to_string(),
        ..DiscoveryOptions::default()
    };
    let mut registry = ReportWriterRegistry::new();
    discover_report_writers(dir.path(), &options, &PluginManifest::builtin(), &mut registry);

    assert_eq!(registry.len(), 1);
    assert!(registry.get("json").is_some());
}
