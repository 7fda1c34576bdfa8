//! Markdown report writer.

use super::escape::{escape_markdown_inline, escape_markdown_table, escape_md_opt};
use super::{PortabilityReport, ReportError, ReportWriter, ResultFormatInfo};
use std::fmt::Write as _;
use std::io::Write;

/// Markdown report writer
#[derive(Debug, Default)]
pub struct MarkdownReportWriter;

impl MarkdownReportWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_markdown(report: &PortabilityReport) -> Result<String, std::fmt::Error> {
        let mut md = String::new();

        writeln!(
            md,
            "# Portability report: {}",
            escape_markdown_inline(&report.application_name)
        )?;
        writeln!(md)?;
        writeln!(
            md,
            "Generated {} against catalog built by {} ({}).",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            escape_markdown_inline(&report.catalog_built_by),
            report.catalog_last_modified.format("%Y-%m-%d")
        )?;
        writeln!(md)?;

        let targets: Vec<String> = report.targets.iter().map(ToString::to_string).collect();
        writeln!(md, "| Targets | Framework APIs | Third-party APIs |")?;
        writeln!(md, "|---|---|---|")?;
        writeln!(
            md,
            "| {} | {} | {} |",
            escape_markdown_table(&targets.join(", ")),
            report.analyzed_api_count,
            report.third_party_api_count
        )?;
        writeln!(md)?;

        writeln!(md, "## Missing APIs")?;
        writeln!(md)?;
        if report.missing_apis.is_empty() {
            writeln!(md, "_None._")?;
        } else {
            writeln!(md, "| API | Assembly | Missing on | Supported on |")?;
            writeln!(md, "|---|---|---|---|")?;
            for api in &report.missing_apis {
                let missing: Vec<String> = api.missing_on.iter().map(ToString::to_string).collect();
                let supported: Vec<String> =
                    api.supported_on.iter().map(ToString::to_string).collect();
                writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    escape_markdown_table(&api.doc_id),
                    escape_md_opt(api.assembly.as_deref()),
                    escape_markdown_table(&missing.join(", ")),
                    escape_markdown_table(&supported.join(", "))
                )?;
            }
        }
        writeln!(md)?;

        writeln!(md, "## Breaking changes")?;
        writeln!(md)?;
        if report.breaking_changes.is_empty() {
            writeln!(md, "_None._")?;
        } else {
            writeln!(md, "| Id | Title | Scope | Broken in | Fixed in |")?;
            writeln!(md, "|---|---|---|---|---|")?;
            for change in &report.breaking_changes {
                writeln!(
                    md,
                    "| {} | {} | {:?} | {} | {} |",
                    escape_markdown_table(&change.id),
                    escape_markdown_table(&change.title),
                    change.impact_scope,
                    escape_md_opt(change.version_broken.as_deref()),
                    escape_md_opt(change.version_fixed.as_deref())
                )?;
            }
        }

        if !report.exceptions.is_empty() {
            writeln!(md)?;
            writeln!(md, "## Known exceptions")?;
            writeln!(md)?;
            writeln!(md, "| API | Platform | Version | Exception |")?;
            writeln!(md, "|---|---|---|---|")?;
            for record in &report.exceptions {
                for info in &record.exceptions {
                    writeln!(
                        md,
                        "| {} | {} | {} | {} |",
                        escape_markdown_table(&record.doc_id),
                        escape_markdown_table(&info.platform),
                        escape_markdown_table(&info.version),
                        escape_markdown_table(&info.exception)
                    )?;
                }
            }
        }

        Ok(md)
    }
}

impl ReportWriter for MarkdownReportWriter {
    fn id(&self) -> &'static str {
        "markdown"
    }

    fn format(&self) -> ResultFormatInfo {
        ResultFormatInfo::new("markdown", "text/markdown", ".md")
    }

    fn write_report(
        &self,
        report: &PortabilityReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let md = Self::render_markdown(report)?;
        writer.write_all(md.as_bytes())?;
        Ok(())
    }
}
