//! Catalog data structures.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A platform and version an API can be available on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetPlatform {
    /// Platform identifier, e.g. `.NET Framework` or `.NET Core`
    pub name: String,
    /// Dotted version, e.g. `4.8`
    pub version: String,
}

impl TargetPlatform {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Numeric components of the version, non-numeric parts read as 0
    pub(crate) fn version_key(&self) -> Vec<u64> {
        self.version
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    }

    /// Whether support introduced at `self` extends to `requested`: same
    /// platform and a version no later than the requested one.
    #[must_use]
    pub fn covers(&self, requested: &TargetPlatform) -> bool {
        self.name.eq_ignore_ascii_case(&requested.name)
            && self.version_key() <= requested.version_key()
    }
}

impl std::fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},Version=v{}", self.name, self.version)
    }
}

/// Kind of member an API entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Namespace,
    Type,
    Method,
    Property,
    Field,
    Event,
}

/// One platform API and the targets it ships on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// Documentation id, e.g. `M:System.String.Trim`
    pub doc_id: String,
    /// Display name
    pub name: String,
    pub kind: ApiKind,
    /// Doc id of the containing type or namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Targets that support this API
    #[serde(default)]
    pub targets: Vec<TargetPlatform>,
}

/// Versioned dataset of platform APIs and the platforms supporting each.
///
/// Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawCatalog", into = "RawCatalog")]
pub struct ApiCatalog {
    pub built_by: String,
    pub last_modified: DateTime<Utc>,
    pub supported_targets: Vec<TargetPlatform>,
    apis: IndexMap<String, ApiDefinition>,
}

/// On-disk shape of the catalog: APIs as a list.
#[derive(Serialize, Deserialize)]
struct RawCatalog {
    built_by: String,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    supported_targets: Vec<TargetPlatform>,
    #[serde(default)]
    apis: Vec<ApiDefinition>,
}

impl From<RawCatalog> for ApiCatalog {
    fn from(raw: RawCatalog) -> Self {
        Self {
            built_by: raw.built_by,
            last_modified: raw.last_modified,
            supported_targets: raw.supported_targets,
            apis: raw
                .apis
                .into_iter()
                .map(|api| (api.doc_id.clone(), api))
                .collect(),
        }
    }
}

impl From<ApiCatalog> for RawCatalog {
    fn from(catalog: ApiCatalog) -> Self {
        Self {
            built_by: catalog.built_by,
            last_modified: catalog.last_modified,
            supported_targets: catalog.supported_targets,
            apis: catalog.apis.into_values().collect(),
        }
    }
}

impl ApiCatalog {
    /// Build a catalog from its parts
    pub fn new(
        built_by: impl Into<String>,
        last_modified: DateTime<Utc>,
        supported_targets: Vec<TargetPlatform>,
        apis: Vec<ApiDefinition>,
    ) -> Self {
        RawCatalog {
            built_by: built_by.into(),
            last_modified,
            supported_targets,
            apis,
        }
        .into()
    }

    /// Look up an API by doc id
    #[must_use]
    pub fn api(&self, doc_id: &str) -> Option<&ApiDefinition> {
        self.apis.get(doc_id)
    }

    /// Whether the doc id names a platform API
    #[must_use]
    pub fn is_framework_api(&self, doc_id: &str) -> bool {
        self.apis.contains_key(doc_id)
    }

    /// Targets supporting the API, empty for unknown doc ids
    #[must_use]
    pub fn supported_targets_for(&self, doc_id: &str) -> &[TargetPlatform] {
        self.apis
            .get(doc_id)
            .map_or(&[][..], |api| api.targets.as_slice())
    }

    /// Highest supported version of the named platform
    #[must_use]
    pub fn latest_target(&self, name: &str) -> Option<&TargetPlatform> {
        self.supported_targets
            .iter()
            .filter(|t| t.name.eq_ignore_ascii_case(name))
            .max_by_key(|t| t.version_key())
    }

    /// All APIs in catalog order
    pub fn apis(&self) -> impl Iterator<Item = &ApiDefinition> {
        self.apis.values()
    }

    /// Number of APIs
    #[must_use]
    pub fn len(&self) -> usize {
        self.apis.len()
    }

    /// Whether the catalog has no APIs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}

/// One known exception an API raises on a given platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub platform: String,
    pub version: String,
    /// Exception type name
    pub exception: String,
    /// Runtime identifier the note applies to, if restricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
}

/// Known-exception note for one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiException {
    pub doc_id: String,
    #[serde(default)]
    pub exceptions: Vec<ExceptionInfo>,
}

/// Optional catalog of [`ApiException`] records.
///
/// When the backing data is unavailable the catalog still exists, with no
/// exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalDataCatalog {
    pub exceptions: Vec<ApiException>,
}

impl AdditionalDataCatalog {
    pub fn new(exceptions: Vec<ApiException>) -> Self {
        Self { exceptions }
    }

    /// Exception records for one API
    pub fn exceptions_for<'a>(&'a self, doc_id: &'a str) -> impl Iterator<Item = &'a ExceptionInfo> {
        self.exceptions
            .iter()
            .filter(move |e| e.doc_id == doc_id)
            .flat_map(|e| e.exceptions.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty()
    }
}
