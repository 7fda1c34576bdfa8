//! Report type definitions.

use crate::breaking_changes::BreakingChange;
use crate::catalog::{ApiException, TargetPlatform};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes the output format a report writer produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFormatInfo {
    /// Name users select the format by, e.g. `json`
    pub display_name: String,
    pub mime_type: String,
    /// File extension including the dot, e.g. `.json`
    pub file_extension: String,
}

impl ResultFormatInfo {
    pub fn new(
        display_name: impl Into<String>,
        mime_type: impl Into<String>,
        file_extension: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            mime_type: mime_type.into(),
            file_extension: file_extension.into(),
        }
    }

    /// Whether `name` selects this format, by display name or extension
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.display_name.eq_ignore_ascii_case(name)
            || self
                .file_extension
                .trim_start_matches('.')
                .eq_ignore_ascii_case(name.trim_start_matches('.'))
    }
}

impl std::fmt::Display for ResultFormatInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.mime_type)
    }
}

/// A platform API used by the analyzed application that some target lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingApi {
    pub doc_id: String,
    /// Assembly the API was referenced from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
    /// Requested targets that support the API
    pub supported_on: Vec<TargetPlatform>,
    /// Requested targets that do not
    pub missing_on: Vec<TargetPlatform>,
}

/// Everything a report writer renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortabilityReport {
    pub application_name: String,
    pub generated_at: DateTime<Utc>,
    /// Catalog build the results were computed against
    pub catalog_built_by: String,
    pub catalog_last_modified: DateTime<Utc>,
    pub targets: Vec<TargetPlatform>,
    /// Framework APIs checked against the catalog
    pub analyzed_api_count: usize,
    /// APIs skipped as third-party
    pub third_party_api_count: usize,
    pub missing_apis: Vec<MissingApi>,
    pub breaking_changes: Vec<BreakingChange>,
    pub exceptions: Vec<ApiException>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matches_name_or_extension() {
        let info = ResultFormatInfo::new("json", "application/json", ".json");
        assert!(info.matches("JSON"));
        assert!(info.matches(".json"));
        assert!(!info.matches("markdown"));
    }
}
