//! Locating breaking-change records on disk or in the binary.

use super::markdown;
use super::model::{BreakingChange, CategoryAllowList};
use crate::error::{OfflineError, Result};
use crate::resources::{application_dir, codec, BundledResources, EmbeddedResources};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the local override directory.
pub const BREAKING_CHANGES_DIR: &str = "BreakingChanges";

/// Optional allow-list file inside [`BREAKING_CHANGES_DIR`].
pub const CATEGORIES_FILE: &str = "BreakingChangeCategories.json";

/// Serialization format of a breaking-change file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakingChangeFormat {
    Markdown,
    Json,
}

impl BreakingChangeFormat {
    /// Format for a file or resource name, `None` for anything unrecognized
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("md") {
            Some(Self::Markdown)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Which source a load call read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// The `BreakingChanges/` directory
    Local,
    /// Resources compiled into the binary
    Embedded,
}

/// Loads breaking changes from a local directory if present, else from the
/// embedded resources. The two sources are never mixed in one call.
#[derive(Clone)]
pub struct BreakingChangeLoader {
    root: PathBuf,
    embedded: Arc<dyn EmbeddedResources>,
}

impl BreakingChangeLoader {
    /// `root` is the directory whose `BreakingChanges/` child enables local mode
    pub fn new(root: impl Into<PathBuf>, embedded: Arc<dyn EmbeddedResources>) -> Self {
        Self {
            root: root.into(),
            embedded,
        }
    }

    /// Loader rooted next to the running executable with the bundled data
    pub fn for_application_dir() -> Result<Self> {
        Ok(Self::new(
            application_dir()?,
            Arc::new(BundledResources::new()),
        ))
    }

    /// Path of the local override directory
    #[must_use]
    pub fn local_dir(&self) -> PathBuf {
        self.root.join(BREAKING_CHANGES_DIR)
    }

    /// The mode the next [`load`](Self::load) will use
    #[must_use]
    pub fn mode(&self) -> LoadMode {
        if self.local_dir().is_dir() {
            LoadMode::Local
        } else {
            LoadMode::Embedded
        }
    }

    /// Load every record from the selected source, in enumeration order.
    pub fn load(&self) -> Result<Vec<BreakingChange>> {
        match self.mode() {
            LoadMode::Local => self.load_local(),
            LoadMode::Embedded => Ok(self.load_embedded()),
        }
    }

    fn load_local(&self) -> Result<Vec<BreakingChange>> {
        let dir = self.local_dir();
        let allowed = read_allowed_categories(&dir)?;
        let mut files = Vec::new();
        collect_files(&dir, &mut files)?;
        tracing::debug!(
            "Loading breaking changes from {} ({} files)",
            dir.display(),
            files.len()
        );

        let mut changes = Vec::new();
        for path in files {
            let name = path.to_string_lossy().into_owned();
            if path.parent() == Some(dir.as_path())
                && path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case(CATEGORIES_FILE))
            {
                continue;
            }
            let Some(format) = BreakingChangeFormat::from_name(&name) else {
                continue;
            };
            let bytes = std::fs::read(&path).map_err(|e| OfflineError::io(&path, e))?;
            let parsed = parse_breaking_changes(&bytes[..], format, allowed.as_ref(), &name)?;
            changes.extend(parsed);
        }
        Ok(changes)
    }

    fn load_embedded(&self) -> Vec<BreakingChange> {
        let mut changes = Vec::new();
        for name in self.embedded.resource_names() {
            let Some(format) = BreakingChangeFormat::from_name(name) else {
                continue;
            };
            let Some(bytes) = self.embedded.resource(name) else {
                continue;
            };
            match parse_breaking_changes(bytes, format, None, name) {
                Ok(parsed) if parsed.is_empty() => {
                    tracing::trace!("No data was found in '{}'", name);
                }
                Ok(parsed) => changes.extend(parsed),
                Err(e) => tracing::debug!("Skipping embedded resource '{}': {}", name, e),
            }
        }
        changes
    }
}

impl std::fmt::Debug for BreakingChangeLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreakingChangeLoader")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Parse one file's records, tagging each with `source`.
///
/// The allow-list applies to markdown only. A JSON file that fails to
/// deserialize contributes nothing.
pub fn parse_breaking_changes(
    reader: impl Read,
    format: BreakingChangeFormat,
    allowed: Option<&CategoryAllowList>,
    source: &str,
) -> Result<Vec<BreakingChange>> {
    let mut changes = match format {
        BreakingChangeFormat::Markdown => markdown::from_markdown_reader(reader, allowed)?,
        BreakingChangeFormat::Json => {
            match codec::deserialize::<Vec<BreakingChange>>(reader, source) {
                Ok(changes) => changes,
                Err(e) => {
                    tracing::debug!("Ignoring malformed breaking change file: {}", e);
                    Vec::new()
                }
            }
        }
    };
    for change in &mut changes {
        change.source = Some(source.to_string());
    }
    Ok(changes)
}

/// Read `BreakingChangeCategories.json` from the local directory, if present.
fn read_allowed_categories(dir: &Path) -> Result<Option<CategoryAllowList>> {
    let path = dir.join(CATEGORIES_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(&path).map_err(|e| OfflineError::io(&path, e))?;
    let categories: Vec<String> = codec::deserialize(BufReader::new(file), CATEGORIES_FILE)?;
    tracing::debug!("Restricting markdown breaking changes to {} categories", categories.len());
    Ok(Some(CategoryAllowList::new(categories)))
}

/// Recursively list files under `dir`, sorted by name within each directory.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| OfflineError::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| OfflineError::io(dir, e))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name() {
        assert_eq!(
            BreakingChangeFormat::from_name("a/b/0001.MD"),
            Some(BreakingChangeFormat::Markdown)
        );
        assert_eq!(
            BreakingChangeFormat::from_name("NS.BreakingChanges.legacy.json"),
            Some(BreakingChangeFormat::Json)
        );
        assert_eq!(BreakingChangeFormat::from_name("notes.txt"), None);
        assert_eq!(BreakingChangeFormat::from_name("README"), None);
    }

    #[test]
    fn test_malformed_json_yields_nothing() {
        let parsed = parse_breaking_changes(
            &b"{ not json"[..],
            BreakingChangeFormat::Json,
            None,
            "bad.json",
        )
        .expect("malformed json is not an error");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_json_ignores_allow_list() {
        let json = br#"[{"Id":"9","Title":"t","Categories":["Behavior"]}]"#;
        let allowed = CategoryAllowList::new(["API"]);
        let parsed = parse_breaking_changes(
            &json[..],
            BreakingChangeFormat::Json,
            Some(&allowed),
            "x.json",
        )
        .expect("parse");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].source.as_deref(), Some("x.json"));
    }
}
