//! Offline data module: wires every loader from one [`OfflineConfig`].
//!
//! The module owns the resolver, the catalog and breaking-change loaders,
//! the framework classifier, and the report-writer registry populated by
//! plugin discovery at construction time.

use crate::analyzer::{DependencyFilter, DotNetFrameworkFilter, FrameworkDefinition, PublicKeyToken};
use crate::breaking_changes::{BreakingChange, BreakingChangeLoader};
use crate::catalog::{AdditionalDataCatalog, ApiCatalog, ApiException, CatalogLoader, TargetPlatform};
use crate::config::OfflineConfig;
use crate::error::{ErrorContext, Result};
use crate::plugins::{discover_report_writers, DiscoveryOptions, PluginManifest, ReportWriterRegistry};
use crate::reports::{MissingApi, PortabilityReport, ReportWriter};
use crate::resources::{application_dir, BundledResources, EmbeddedResources, ResourceResolver};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One API reference found in an analyzed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUsage {
    /// Documentation id of the referenced member
    pub doc_id: String,
    /// Simple name of the assembly defining the member, when known
    #[serde(default)]
    pub assembly: Option<String>,
    /// Public key token of that assembly
    #[serde(default)]
    pub public_key_token: PublicKeyToken,
}

impl ApiUsage {
    pub fn new(
        doc_id: impl Into<String>,
        assembly: Option<&str>,
        public_key_token: PublicKeyToken,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            assembly: assembly.map(str::to_string),
            public_key_token,
        }
    }
}

/// Composition root for the offline data layer.
pub struct OfflineDataModule {
    config: OfflineConfig,
    catalog_loader: CatalogLoader,
    breaking_change_loader: BreakingChangeLoader,
    filter: DotNetFrameworkFilter,
    writers: ReportWriterRegistry,
}

impl OfflineDataModule {
    /// Build the module with the bundled data and the built-in plugin manifest.
    pub fn from_config(config: OfflineConfig) -> Result<Self> {
        Self::with_resources(
            config,
            Arc::new(BundledResources::new()),
            &PluginManifest::builtin(),
        )
    }

    /// Build the module over an explicit embedded tier and plugin manifest.
    pub fn with_resources(
        config: OfflineConfig,
        embedded: Arc<dyn EmbeddedResources>,
        manifest: &PluginManifest,
    ) -> Result<Self> {
        let application_dir = match config.data.application_dir {
            Some(ref dir) => dir.clone(),
            None => application_dir()?,
        };
        let working_dir = config
            .data
            .working_dir
            .clone()
            .unwrap_or_else(|| application_dir.clone());

        let resolver = ResourceResolver::new(
            &application_dir,
            config.data.resource_namespace.as_str(),
            Arc::clone(&embedded),
        );
        let definition =
            FrameworkDefinition::from_config(&config.framework).context("building framework filter")?;

        let plugin_dir: PathBuf = config
            .plugins
            .directory
            .clone()
            .unwrap_or_else(|| application_dir.clone());
        let mut writers = ReportWriterRegistry::new();
        discover_report_writers(
            &plugin_dir,
            &DiscoveryOptions::from(&config.plugins),
            manifest,
            &mut writers,
        );
        tracing::debug!(
            "Offline data module ready: {} report writer(s) from {}",
            writers.len(),
            plugin_dir.display()
        );

        Ok(Self {
            catalog_loader: CatalogLoader::new(resolver),
            breaking_change_loader: BreakingChangeLoader::new(working_dir, embedded),
            filter: DotNetFrameworkFilter::new(definition),
            writers,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &OfflineConfig {
        &self.config
    }

    /// Directory searched for side-by-side data files
    #[must_use]
    pub fn application_dir(&self) -> &Path {
        self.catalog_loader.resolver().base_dir()
    }

    #[must_use]
    pub const fn catalog_loader(&self) -> &CatalogLoader {
        &self.catalog_loader
    }

    #[must_use]
    pub const fn breaking_change_loader(&self) -> &BreakingChangeLoader {
        &self.breaking_change_loader
    }

    #[must_use]
    pub const fn filter(&self) -> &DotNetFrameworkFilter {
        &self.filter
    }

    #[must_use]
    pub const fn report_writers(&self) -> &ReportWriterRegistry {
        &self.writers
    }

    /// Registered writer for a format name or extension
    #[must_use]
    pub fn report_writer(&self, format: &str) -> Option<Arc<dyn ReportWriter>> {
        self.writers.get(format)
    }

    pub fn load_catalog(&self) -> Result<ApiCatalog> {
        self.catalog_loader.load_catalog()
    }

    pub fn load_additional_data(&self) -> Result<AdditionalDataCatalog> {
        self.catalog_loader.load_additional_data()
    }

    pub fn load_breaking_changes(&self) -> Result<Vec<BreakingChange>> {
        self.breaking_change_loader.load()
    }

    /// Analyze API usages against the catalog and collect everything a
    /// report renders.
    ///
    /// Usages from third-party assemblies are counted and skipped. When
    /// `targets` is empty the latest version of every catalog platform is
    /// used.
    pub fn build_report(
        &self,
        application_name: &str,
        usages: &[ApiUsage],
        targets: &[TargetPlatform],
    ) -> Result<PortabilityReport> {
        let catalog = self.load_catalog()?;
        let additional = self.load_additional_data()?;
        let breaking_changes = self.load_breaking_changes()?;

        let targets = if targets.is_empty() {
            default_targets(&catalog)
        } else {
            targets.to_vec()
        };

        let mut analyzed = 0;
        let mut third_party = 0;
        let mut used: Vec<&ApiUsage> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for usage in usages {
            if !self
                .filter
                .is_framework_member(usage.assembly.as_deref(), &usage.public_key_token)
            {
                third_party += 1;
                continue;
            }
            analyzed += 1;
            if seen.insert(usage.doc_id.as_str()) {
                used.push(usage);
            }
        }

        let missing_apis = used
            .iter()
            .filter_map(|usage| missing_api(&catalog, usage, &targets))
            .collect();

        let breaking_changes = breaking_changes
            .into_iter()
            .filter(|change| {
                change
                    .applicable_apis
                    .iter()
                    .any(|api| seen.contains(api.as_str()))
            })
            .collect();

        let exceptions: Vec<ApiException> = additional
            .exceptions
            .into_iter()
            .filter(|record| seen.contains(record.doc_id.as_str()))
            .collect();

        Ok(PortabilityReport {
            application_name: application_name.to_string(),
            generated_at: Utc::now(),
            catalog_built_by: catalog.built_by.clone(),
            catalog_last_modified: catalog.last_modified,
            targets,
            analyzed_api_count: analyzed,
            third_party_api_count: third_party,
            missing_apis,
            breaking_changes,
            exceptions,
        })
    }
}

impl std::fmt::Debug for OfflineDataModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineDataModule")
            .field("application_dir", &self.application_dir())
            .field("breaking_changes", &self.breaking_change_loader.local_dir())
            .field("writers", &self.writers)
            .finish_non_exhaustive()
    }
}

/// Latest version of every platform the catalog supports, in catalog order.
fn default_targets(catalog: &ApiCatalog) -> Vec<TargetPlatform> {
    let mut names: Vec<&str> = Vec::new();
    for target in &catalog.supported_targets {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&target.name)) {
            names.push(&target.name);
        }
    }
    names
        .into_iter()
        .filter_map(|name| catalog.latest_target(name).cloned())
        .collect()
}

fn missing_api(
    catalog: &ApiCatalog,
    usage: &ApiUsage,
    targets: &[TargetPlatform],
) -> Option<MissingApi> {
    let supported = catalog.supported_targets_for(&usage.doc_id);
    let (supported_on, missing_on): (Vec<TargetPlatform>, Vec<TargetPlatform>) = targets
        .iter()
        .cloned()
        .partition(|target| supported.iter().any(|s| s.covers(target)));

    if missing_on.is_empty() {
        return None;
    }
    Some(MissingApi {
        doc_id: usage.doc_id.clone(),
        assembly: usage.assembly.clone(),
        supported_on,
        missing_on,
    })
}
