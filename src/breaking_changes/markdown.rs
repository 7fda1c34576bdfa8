//! Markdown breaking-change format.
//!
//! A file holds one or more records. Each record starts with a level-two
//! heading `## <id>: <title>`; level-three headings select the field the
//! following lines belong to:
//!
//! ```text
//! ## 42: List<T>.Sort is unstable
//!
//! ### Scope
//! Edge
//!
//! ### Change Description
//! Sorting equal elements may reorder them.
//!
//! - [x] Quirked
//! - [ ] Build-time break
//!
//! ### Affected APIs
//! * `M:System.Collections.Generic.List`1.Sort`
//!
//! ### Category
//! Core
//! ```
//!
//! HTML comments are dropped before parsing.

use super::model::{BreakingChange, BreakingChangeImpact, CategoryAllowList};
use crate::error::Result;
use regex::Regex;
use std::io::Read;
use std::sync::LazyLock;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"));

static RECORD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+(?:(?P<id>\d+):\s+)?(?P<title>.+?)\s*$").expect("static regex")
});

static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(?P<name>.+?)\s*$").expect("static regex"));

static TASK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*]\s*\[(?P<mark>[ xX])\]\s*(?P<label>.+?)\s*$").expect("static regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Scope,
    VersionBroken,
    VersionFixed,
    SourceAnalyzerStatus,
    Details,
    Suggestion,
    AffectedApis,
    Categories,
    Notes,
    BugLink,
    Link,
    Ignored,
}

impl Section {
    fn from_heading(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "scope" | "impact" => Self::Scope,
            "version introduced" | "version broken" => Self::VersionBroken,
            "version reverted" | "version fixed" => Self::VersionFixed,
            "source analyzer status" => Self::SourceAnalyzerStatus,
            "change description" | "description" | "details" => Self::Details,
            "recommended action" | "suggestion" => Self::Suggestion,
            "affected apis" | "applicable apis" => Self::AffectedApis,
            "category" | "categories" => Self::Categories,
            "notes" => Self::Notes,
            "original bug" | "bug" => Self::BugLink,
            "link" | "more information" => Self::Link,
            _ => Self::Ignored,
        }
    }
}

/// Accumulates the lines of one record.
struct RecordBuilder {
    change: BreakingChange,
    section: Section,
    text: Vec<(Section, String)>,
}

impl RecordBuilder {
    fn new(id: Option<&str>, title: &str) -> Self {
        Self {
            change: BreakingChange {
                id: id.unwrap_or_default().to_string(),
                title: title.to_string(),
                ..BreakingChange::default()
            },
            section: Section::Ignored,
            text: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if let Some(caps) = TASK_ITEM.captures(line) {
            let checked = !caps["mark"].trim().is_empty();
            let label = caps["label"].to_ascii_lowercase();
            if label.starts_with("quirk") {
                self.change.is_quirked = checked;
                return;
            }
            if label.starts_with("build-time") || label.starts_with("build time") {
                self.change.is_build_time = checked;
                return;
            }
            if label.starts_with("retargeting") {
                self.change.is_retargeting = checked;
                return;
            }
        }

        match self.section {
            Section::AffectedApis => {
                let api = strip_list_marker(line).trim_matches('`').trim();
                if !api.is_empty() {
                    self.change.applicable_apis.push(api.to_string());
                }
            }
            Section::Categories => {
                self.change.categories.extend(
                    strip_list_marker(line)
                        .split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string),
                );
            }
            Section::Ignored => {}
            section => self.text.push((section, line.to_string())),
        }
    }

    fn finish(self) -> BreakingChange {
        let Self { mut change, text, .. } = self;
        let section = |wanted: Section| section_text(&text, wanted);

        if let Some(scope) = section(Section::Scope) {
            change.impact_scope = BreakingChangeImpact::parse(&scope);
        }
        change.version_broken = section(Section::VersionBroken);
        change.version_fixed = section(Section::VersionFixed);
        change.source_analyzer_status = section(Section::SourceAnalyzerStatus);
        change.details = section(Section::Details).unwrap_or_default();
        change.suggestion = section(Section::Suggestion);
        change.notes = section(Section::Notes);
        change.bug_link = section(Section::BugLink);
        change.link = section(Section::Link);
        change
    }
}

/// Trimmed text collected under `wanted`, `None` when blank.
fn section_text(text: &[(Section, String)], wanted: Section) -> Option<String> {
    let joined = text
        .iter()
        .filter(|(s, _)| *s == wanted)
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
        .unwrap_or(trimmed)
}

/// Parse every record in a markdown document.
///
/// With an allow-list, only records carrying at least one allowed category
/// are returned; `None` keeps everything.
#[must_use]
pub fn from_markdown(text: &str, allowed: Option<&CategoryAllowList>) -> Vec<BreakingChange> {
    let text = HTML_COMMENT.replace_all(text, "");
    let mut changes = Vec::new();
    let mut current: Option<RecordBuilder> = None;

    for line in text.lines() {
        if let Some(caps) = SECTION_HEADING.captures(line) {
            if let Some(builder) = current.as_mut() {
                builder.section = Section::from_heading(&caps["name"]);
            }
            continue;
        }
        if let Some(caps) = RECORD_HEADING.captures(line) {
            if let Some(done) = current.take() {
                changes.push(done.finish());
            }
            let id = caps.name("id").map(|m| m.as_str());
            current = Some(RecordBuilder::new(id, &caps["title"]));
            continue;
        }
        if let Some(builder) = current.as_mut() {
            builder.push_line(line);
        }
    }
    if let Some(done) = current.take() {
        changes.push(done.finish());
    }

    if let Some(allowed) = allowed {
        changes.retain(|c| c.has_category_in(allowed));
    }
    changes
}

/// Read a markdown document from a stream and parse it.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn from_markdown_reader(
    mut reader: impl Read,
    allowed: Option<&CategoryAllowList>,
) -> Result<Vec<BreakingChange>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(from_markdown(&String::from_utf8_lossy(&bytes), allowed))
}
