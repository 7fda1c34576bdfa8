//! Report-writer discovery.
//!
//! Scans a directory for report plugin binaries, resolves each one against
//! the [`PluginManifest`] by simple name, and registers the writers it
//! provides. Discovery never fails: unreadable directories and modules that
//! cannot be loaded are logged and skipped.

use super::manifest::{PluginManifest, REPORTS_PREFIX};
use super::registry::ReportWriterRegistry;
use crate::config::PluginConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Filename rules for report plugin candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Required filename prefix, matched case-insensitively
    pub prefix: String,
    /// Required extension including the dot, matched case-insensitively
    pub extension: String,
    /// Suffix of generated companions that shadow a primary binary
    pub companion_suffix: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            prefix: REPORTS_PREFIX.to_string(),
            extension: ".dll".to_string(),
            companion_suffix: ".views.dll".to_string(),
        }
    }
}

impl From<&PluginConfig> for DiscoveryOptions {
    fn from(config: &PluginConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            extension: config.extension.clone(),
            companion_suffix: config.companion_suffix.clone(),
        }
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Files in `dir` named `<prefix>*<extension>`, sorted by name.
///
/// The scan is not recursive. A missing or unreadable directory yields no
/// candidates.
#[must_use]
pub fn report_plugin_candidates(dir: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot scan {} for report plugins: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            file_name(path).is_some_and(|name| {
                starts_with_ignore_case(name, &options.prefix)
                    && ends_with_ignore_case(name, &options.extension)
            })
        })
        .collect();
    candidates.sort();
    candidates
}

/// Whether `name` is a generated companion whose primary binary is also
/// among `candidates`.
///
/// `Reports.Foo.views.dll` is skipped only when `Reports.Foo.dll` is
/// present; an orphan companion is treated as an ordinary candidate.
#[must_use]
pub fn is_generated_companion(name: &str, candidates: &[PathBuf], options: &DiscoveryOptions) -> bool {
    if !ends_with_ignore_case(name, &options.companion_suffix) {
        return false;
    }
    let stem = &name[..name.len() - options.companion_suffix.len()];
    let primary = format!("{stem}{}", options.extension);
    candidates
        .iter()
        .filter_map(|p| file_name(p))
        .any(|candidate| candidate.eq_ignore_ascii_case(&primary))
}

/// Simple name used to resolve a candidate: its file name without the final
/// extension.
fn simple_name(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

fn register_candidate(
    path: &Path,
    manifest: &PluginManifest,
    registry: &mut ReportWriterRegistry,
) -> Result<usize> {
    let name = simple_name(path).unwrap_or_default();
    let module = manifest.load(name)?;
    let writers = module.report_writers()?;
    let mut added = 0;
    for writer in writers {
        if registry.register(writer) {
            added += 1;
        }
    }
    Ok(added)
}

/// Register every report writer provided by plugin binaries in `dir`.
pub fn discover_report_writers(
    dir: &Path,
    options: &DiscoveryOptions,
    manifest: &PluginManifest,
    registry: &mut ReportWriterRegistry,
) {
    let candidates = report_plugin_candidates(dir, options);

    for path in &candidates {
        let Some(name) = file_name(path) else {
            continue;
        };
        if is_generated_companion(name, &candidates, options) {
            tracing::trace!("Skipping generated companion {}", name);
            continue;
        }
        match register_candidate(path, manifest, registry) {
            Ok(added) => tracing::debug!("Loaded {} report writer(s) from {}", added, name),
            Err(e) => tracing::debug!("Could not load report plugin {}: {}", name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::StaticPluginModule;
    use crate::reports::{MarkdownReportWriter, ReportWriter};
    use crate::error::{OfflineError, PluginErrorKind};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"MZ").expect("write candidate");
    }

    fn names(paths: &[PathBuf]) -> Vec<&str> {
        paths.iter().filter_map(|p| file_name(p)).collect()
    }

    #[test]
    fn test_candidate_filter() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Microsoft.Fx.Portability.Reports.Json.dll");
        touch(&dir, "microsoft.fx.portability.reports.html.DLL");
        touch(&dir, "Microsoft.Fx.Portability.Core.dll");
        touch(&dir, "Microsoft.Fx.Portability.Reports.Json.pdb");
        std::fs::create_dir(dir.path().join("Microsoft.Fx.Portability.Reports.Dir.dll")).unwrap();

        let candidates = report_plugin_candidates(dir.path(), &DiscoveryOptions::default());
        assert_eq!(
            names(&candidates),
            vec![
                "Microsoft.Fx.Portability.Reports.Json.dll",
                "microsoft.fx.portability.reports.html.DLL",
            ]
        );
    }

    #[test]
    fn test_missing_directory_has_no_candidates() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(report_plugin_candidates(&missing, &DiscoveryOptions::default()).is_empty());
    }

    #[test]
    fn test_companion_needs_primary() {
        let options = DiscoveryOptions::default();
        let with_primary = vec![
            PathBuf::from("Microsoft.Fx.Portability.Reports.Html.dll"),
            PathBuf::from("Microsoft.Fx.Portability.Reports.Html.views.dll"),
        ];
        assert!(is_generated_companion(
            "Microsoft.Fx.Portability.Reports.Html.views.dll",
            &with_primary,
            &options
        ));
        assert!(!is_generated_companion(
            "Microsoft.Fx.Portability.Reports.Html.dll",
            &with_primary,
            &options
        ));

        let orphan = vec![PathBuf::from("Microsoft.Fx.Portability.Reports.Html.views.dll")];
        assert!(!is_generated_companion(
            "Microsoft.Fx.Portability.Reports.Html.views.dll",
            &orphan,
            &options
        ));
    }

    #[test]
    fn test_discovery_skips_companion_of_present_primary() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Microsoft.Fx.Portability.Reports.Markdown.dll");
        touch(&dir, "Microsoft.Fx.Portability.Reports.Markdown.views.dll");

        let mut manifest = PluginManifest::new();
        manifest.register(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Markdown",
            || Ok(vec![Arc::new(MarkdownReportWriter::new()) as Arc<dyn ReportWriter>]),
        ));
        // Would fail the test if the companion were loaded
        manifest.register(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Markdown.views",
            || panic!("companion must not be loaded"),
        ));

        let mut registry = ReportWriterRegistry::new();
        discover_report_writers(dir.path(), &DiscoveryOptions::default(), &manifest, &mut registry);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("markdown").is_some());
    }

    #[test]
    fn test_orphan_companion_is_loaded() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Microsoft.Fx.Portability.Reports.Bar.views.dll");

        let mut manifest = PluginManifest::new();
        manifest.register(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Bar.views",
            || Ok(vec![Arc::new(MarkdownReportWriter::new()) as Arc<dyn ReportWriter>]),
        ));

        let mut registry = ReportWriterRegistry::new();
        discover_report_writers(dir.path(), &DiscoveryOptions::default(), &manifest, &mut registry);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failing_module_does_not_block_others() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Microsoft.Fx.Portability.Reports.Broken.dll");
        touch(&dir, "Microsoft.Fx.Portability.Reports.Json.dll");
        touch(&dir, "Microsoft.Fx.Portability.Reports.Unknown.dll");

        let manifest = PluginManifest::builtin().with(StaticPluginModule::new(
            "Microsoft.Fx.Portability.Reports.Broken",
            || {
                Err(OfflineError::plugin(
                    "Microsoft.Fx.Portability.Reports.Broken",
                    PluginErrorKind::MissingDependency("Microsoft.Fx.Portability.Razor".into()),
                ))
            },
        ));

        let mut registry = ReportWriterRegistry::new();
        discover_report_writers(dir.path(), &DiscoveryOptions::default(), &manifest, &mut registry);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("json").is_some());
    }
}
