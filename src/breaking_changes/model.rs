//! Breaking change records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How widely a breaking change is expected to affect applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakingChangeImpact {
    Major,
    Minor,
    Edge,
    Transparent,
    #[default]
    Unknown,
}

impl BreakingChangeImpact {
    /// Parse a scope name, case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Self::Major,
            "minor" => Self::Minor,
            "edge" => Self::Edge,
            "transparent" => Self::Transparent,
            _ => Self::Unknown,
        }
    }
}

/// A recorded incompatibility between platform versions.
///
/// JSON files spell the fields in PascalCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BreakingChange {
    pub id: String,
    pub title: String,
    pub impact_scope: BreakingChangeImpact,
    pub version_broken: Option<String>,
    pub version_fixed: Option<String>,
    pub details: String,
    pub suggestion: Option<String>,
    /// Doc ids of the affected API surface
    pub applicable_apis: Vec<String>,
    pub link: Option<String>,
    pub bug_link: Option<String>,
    pub is_quirked: bool,
    pub is_build_time: bool,
    pub is_retargeting: bool,
    pub source_analyzer_status: Option<String>,
    pub notes: Option<String>,
    pub categories: Vec<String>,
    /// File or embedded resource the record was read from
    #[serde(skip)]
    pub source: Option<String>,
}

impl BreakingChange {
    /// Whether any of this change's categories is in `allowed`
    #[must_use]
    pub fn has_category_in(&self, allowed: &CategoryAllowList) -> bool {
        self.categories.iter().any(|c| allowed.contains(c))
    }
}

/// Set of category names a markdown parse keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAllowList {
    categories: HashSet<String>,
}

impl CategoryAllowList {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category.trim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
