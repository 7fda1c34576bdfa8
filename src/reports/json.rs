//! JSON report writer.

use super::{PortabilityReport, ReportError, ReportWriter, ResultFormatInfo};
use serde::Serialize;
use std::io::Write;

/// JSON report writer
pub struct JsonReportWriter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReportWriter {
    /// Create a new JSON writer
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: ToolInfo,
    #[serde(flatten)]
    report: &'a PortabilityReport,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ReportWriter for JsonReportWriter {
    fn id(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> ResultFormatInfo {
        ResultFormatInfo::new("json", "application/json", ".json")
    }

    fn write_report(
        &self,
        report: &PortabilityReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let doc = JsonReport {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            report,
        };
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &doc)
        } else {
            serde_json::to_writer(&mut *writer, &doc)
        };
        result.map_err(|e| ReportError::SerializationError(e.to_string()))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TargetPlatform;
    use crate::reports::MissingApi;
    use chrono::Utc;

    #[test]
    fn test_json_report_is_valid_json() {
        let report = PortabilityReport {
            application_name: "Contoso.App".into(),
            generated_at: Utc::now(),
            catalog_built_by: "unit".into(),
            catalog_last_modified: Utc::now(),
            targets: vec![TargetPlatform::new(".NET Core", "3.1")],
            analyzed_api_count: 1,
            third_party_api_count: 0,
            missing_apis: vec![MissingApi {
                doc_id: "M:System.AppDomain.CreateDomain(System.String)".into(),
                assembly: Some("mscorlib".into()),
                supported_on: Vec::new(),
                missing_on: vec![TargetPlatform::new(".NET Core", "3.1")],
            }],
            breaking_changes: Vec::new(),
            exceptions: Vec::new(),
        };

        let out = JsonReportWriter::new().pretty(false).render(&report).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["application_name"], "Contoso.App");
        assert_eq!(value["tool"]["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(value["missing_apis"].as_array().map(Vec::len), Some(1));
    }
}
