//! Two-tier resource lookup: side-by-side file, then embedded resource.

use super::{application_dir, BundledResources, EmbeddedResources, DEFAULT_RESOURCE_NAMESPACE};
use crate::error::{OfflineError, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a resolved resource came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// A file beside the executable
    SideBySide(PathBuf),
    /// A resource compiled into the binary, by full resource name
    Embedded(String),
}

/// An open, readable resource.
///
/// The file handle (if any) is released when the stream is dropped.
pub struct ResourceStream<'a> {
    origin: ResourceOrigin,
    reader: Box<dyn Read + 'a>,
}

impl<'a> ResourceStream<'a> {
    /// Where this stream was opened from
    #[must_use]
    pub const fn origin(&self) -> &ResourceOrigin {
        &self.origin
    }

    /// Read the remaining bytes
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for ResourceStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl std::fmt::Debug for ResourceStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStream")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Resolves logical file names to readable streams.
///
/// Resolution order, first match wins:
/// 1. `<base_dir>/<logical_name>` on disk
/// 2. the embedded resource `<namespace><logical_name>`
#[derive(Clone)]
pub struct ResourceResolver {
    base_dir: PathBuf,
    namespace: String,
    embedded: Arc<dyn EmbeddedResources>,
}

impl ResourceResolver {
    /// Create a resolver over an explicit directory and embedded set
    pub fn new(
        base_dir: impl Into<PathBuf>,
        namespace: impl Into<String>,
        embedded: Arc<dyn EmbeddedResources>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            namespace: namespace.into(),
            embedded,
        }
    }

    /// Resolver rooted at the executable's directory with the bundled data
    pub fn for_current_exe() -> Result<Self> {
        Ok(Self::new(
            application_dir()?,
            DEFAULT_RESOURCE_NAMESPACE,
            Arc::new(BundledResources::new()),
        ))
    }

    /// Directory searched for side-by-side files
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The embedded resource tier
    #[must_use]
    pub fn embedded(&self) -> &dyn EmbeddedResources {
        self.embedded.as_ref()
    }

    /// Full embedded resource name for a logical name
    #[must_use]
    pub fn resource_name(&self, logical_name: &str) -> String {
        format!("{}{}", self.namespace, logical_name)
    }

    /// Path a side-by-side override would live at
    #[must_use]
    pub fn local_path(&self, logical_name: &str) -> PathBuf {
        self.base_dir.join(logical_name)
    }

    /// Whether a side-by-side file exists for this logical name
    #[must_use]
    pub fn has_local_file(&self, logical_name: &str) -> bool {
        self.local_path(logical_name).is_file()
    }

    /// Whether an embedded resource exists for this logical name
    #[must_use]
    pub fn has_embedded(&self, logical_name: &str) -> bool {
        self.embedded.contains(&self.resource_name(logical_name))
    }

    /// Whether either tier can serve this logical name
    #[must_use]
    pub fn exists(&self, logical_name: &str) -> bool {
        self.has_local_file(logical_name) || self.has_embedded(logical_name)
    }

    /// First tier: open the side-by-side file, if there is one.
    pub fn try_local(&self, logical_name: &str) -> Result<Option<ResourceStream<'_>>> {
        let path = self.local_path(logical_name);
        if !path.is_file() {
            return Ok(None);
        }
        let file = File::open(&path).map_err(|e| OfflineError::io(&path, e))?;
        tracing::debug!("Resolved '{}' to {}", logical_name, path.display());
        Ok(Some(ResourceStream {
            origin: ResourceOrigin::SideBySide(path),
            reader: Box::new(BufReader::new(file)),
        }))
    }

    /// Second tier: open the embedded resource, if there is one.
    #[must_use]
    pub fn try_embedded(&self, logical_name: &str) -> Option<ResourceStream<'_>> {
        let name = self.resource_name(logical_name);
        let bytes = self.embedded.resource(&name)?;
        tracing::debug!("Resolved '{}' to embedded resource {}", logical_name, name);
        Some(ResourceStream {
            origin: ResourceOrigin::Embedded(name),
            reader: Box::new(Cursor::new(bytes)),
        })
    }

    /// Open a logical resource, preferring the side-by-side file.
    ///
    /// Fails with [`OfflineError::ResourceNotFound`] carrying `logical_name`
    /// when neither tier has it.
    pub fn open(&self, logical_name: &str) -> Result<ResourceStream<'_>> {
        if let Some(stream) = self.try_local(logical_name)? {
            return Ok(stream);
        }
        self.try_embedded(logical_name)
            .ok_or_else(|| OfflineError::not_found(logical_name))
    }
}

impl std::fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceResolver")
            .field("base_dir", &self.base_dir)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
