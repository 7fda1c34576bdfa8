//! Resources compiled into the binary.

use indexmap::IndexMap;

/// Read-only set of named byte blobs shipped inside the program.
///
/// Name lookups are ASCII case-insensitive.
pub trait EmbeddedResources: Send + Sync {
    /// All resource names, in a stable order.
    fn resource_names(&self) -> Vec<&str>;

    /// Bytes of the named resource, if present.
    fn resource(&self, name: &str) -> Option<&[u8]>;

    /// Whether the named resource exists.
    fn contains(&self, name: &str) -> bool {
        self.resource(name).is_some()
    }
}

#[cfg(feature = "bundled-data")]
static BUNDLED: &[(&str, &[u8])] = &[
    (
        "Microsoft.Fx.Portability.Offline.data.catalog.bin",
        include_bytes!("../../data/catalog.bin"),
    ),
    (
        "Microsoft.Fx.Portability.Offline.data.exceptions.bin",
        include_bytes!("../../data/exceptions.bin"),
    ),
    (
        "Microsoft.Fx.Portability.Offline.BreakingChanges.0001_uri_unicode_bidi.md",
        include_bytes!("../../data/BreakingChanges/0001_uri_unicode_bidi.md"),
    ),
    (
        "Microsoft.Fx.Portability.Offline.BreakingChanges.0002_wcf_msmq_security.md",
        include_bytes!("../../data/BreakingChanges/0002_wcf_msmq_security.md"),
    ),
    (
        "Microsoft.Fx.Portability.Offline.BreakingChanges.0003_list_sort.md",
        include_bytes!("../../data/BreakingChanges/0003_list_sort.md"),
    ),
    (
        "Microsoft.Fx.Portability.Offline.BreakingChanges.legacy.json",
        include_bytes!("../../data/BreakingChanges/legacy.json"),
    ),
];

#[cfg(not(feature = "bundled-data"))]
static BUNDLED: &[(&str, &[u8])] = &[];

/// The data files under `data/`, compiled in when the `bundled-data`
/// feature is enabled. Empty otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl BundledResources {
    /// Create a handle to the compiled-in resources
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EmbeddedResources for BundledResources {
    fn resource_names(&self) -> Vec<&str> {
        BUNDLED.iter().map(|(name, _)| *name).collect()
    }

    fn resource(&self, name: &str) -> Option<&[u8]> {
        BUNDLED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, bytes)| *bytes)
    }
}

/// Embedded resources held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResources {
    entries: IndexMap<String, Vec<u8>>,
}

impl InMemoryResources {
    /// Create an empty resource set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add or replace a resource
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Number of resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EmbeddedResources for InMemoryResources {
    fn resource_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    fn resource(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, bytes)| bytes.as_slice())
    }
}
