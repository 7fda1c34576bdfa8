//! **Offline data layer for the API portability analyzer.**
//!
//! `apiport-offline` supplies everything the analyzer needs without a
//! network service: the API catalog, optional known-exception data,
//! breaking-change records, report-writer plugins, and the classifier that
//! separates framework assemblies from third-party code.
//!
//! ## Core Concepts & Modules
//!
//! - **[`resources`]**: Two-tier lookup of data files. A file next to the
//!   application always wins over the copy embedded in the binary.
//! - **[`catalog`]**: [`CatalogLoader`] decodes the mandatory `catalog.bin`
//!   and the optional `exceptions.bin`.
//! - **[`breaking_changes`]**: [`BreakingChangeLoader`] reads records from a
//!   local `BreakingChanges/` directory, or from embedded data when that
//!   directory is absent. Markdown and JSON files are both supported.
//! - **[`plugins`]**: Discovery of `Microsoft.Fx.Portability.Reports.*`
//!   binaries, resolved against an explicit [`PluginManifest`].
//! - **[`analyzer`]**: [`DotNetFrameworkFilter`], the framework-assembly
//!   classifier driven by public key tokens and name prefixes.
//! - **[`reports`]**: The [`ReportWriter`] capability and the built-in JSON
//!   and Markdown writers.
//! - **[`offline`]**: [`OfflineDataModule`] wires all of the above from one
//!   [`OfflineConfig`].
//!
//! ## Getting Started
//!
//! ```no_run
//! use apiport_offline::{OfflineConfig, OfflineDataModule};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let module = OfflineDataModule::from_config(OfflineConfig::default())?;
//!
//!     let catalog = module.load_catalog()?;
//!     println!("{} APIs, built by {}", catalog.len(), catalog.built_by);
//!
//!     for change in module.load_breaking_changes()? {
//!         println!("[{}] {}", change.id, change.title);
//!     }
//!
//!     for format in module.report_writers().formats() {
//!         println!("report format: {format}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Classifying assemblies
//!
//! ```
//! use apiport_offline::{DependencyFilter, DotNetFrameworkFilter, PublicKeyToken};
//!
//! let filter = DotNetFrameworkFilter::default();
//! assert!(filter.is_framework_assembly(Some("System.Net.Http"), &PublicKeyToken::EMPTY));
//! assert!(!filter.is_framework_assembly(Some("Newtonsoft.Json"), &PublicKeyToken::EMPTY));
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-data` (default): compiles the files under `data/` into the
//!   binary as the embedded resource tier. Without it the embedded tier is
//!   empty and only side-by-side files are found.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod analyzer;
pub mod breaking_changes;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod offline;
pub mod plugins;
pub mod reports;
pub mod resources;

// Re-export main types for convenience
pub use analyzer::{DependencyFilter, DotNetFrameworkFilter, FrameworkDefinition, PublicKeyToken};
pub use breaking_changes::{BreakingChange, BreakingChangeImpact, BreakingChangeLoader, LoadMode};
pub use catalog::{AdditionalDataCatalog, ApiCatalog, ApiException, CatalogLoader, TargetPlatform};
pub use config::{ConfigError, OfflineConfig, Validatable};
pub use error::{ErrorContext, OfflineError, OptionContext, Result};
pub use offline::{ApiUsage, OfflineDataModule};
pub use plugins::{PluginManifest, PluginModule, ReportWriterRegistry};
pub use reports::{PortabilityReport, ReportWriter, ResultFormatInfo};
pub use resources::{EmbeddedResources, ResourceResolver};
