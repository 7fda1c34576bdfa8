//! Report plugin discovery.
//!
//! Report writers ship as separate binaries next to the application, named
//! `Microsoft.Fx.Portability.Reports.*.dll`. [`discover_report_writers`]
//! scans a directory for such files, resolves each file's simple name
//! against an explicit [`PluginManifest`], and registers the writers each
//! module provides in a [`ReportWriterRegistry`].

mod discovery;
mod manifest;
mod registry;

pub use discovery::{
    discover_report_writers, is_generated_companion, report_plugin_candidates, DiscoveryOptions,
};
pub use manifest::{PluginManifest, PluginModule, StaticPluginModule, WriterFactory, REPORTS_PREFIX};
pub use registry::ReportWriterRegistry;
