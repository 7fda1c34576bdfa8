//! Report writers.
//!
//! A [`ReportWriter`] renders a [`PortabilityReport`] in one output format.
//! Writers are not constructed directly by the application; they are
//! contributed by plugin modules and collected in a
//! [`crate::plugins::ReportWriterRegistry`] during discovery.
//!
//! Built-in writers:
//! - JSON: structured data for programmatic integration
//! - Markdown: human-readable tables
//!
//! All catalog-derived text (doc ids, titles, details) passes through
//! [`escape`] before it is embedded in Markdown.

pub mod escape;
mod json;
mod markdown;
mod types;

pub use json::JsonReportWriter;
pub use markdown::MarkdownReportWriter;
pub use types::{MissingApi, PortabilityReport, ResultFormatInfo};

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Capability implemented by every report writer.
pub trait ReportWriter: Send + Sync {
    /// Stable identity; the registry keeps one instance per id
    fn id(&self) -> &'static str;

    /// The format this writer produces
    fn format(&self) -> ResultFormatInfo;

    /// Render a report into `writer`
    fn write_report(
        &self,
        report: &PortabilityReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError>;

    /// Render a report into a string
    fn render(&self, report: &PortabilityReport) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        self.write_report(report, &mut buf)?;
        String::from_utf8(buf).map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}
