//! Data resource resolution.
//!
//! Supporting data (the API catalog, the known-exceptions list, breaking
//! change records) either sits next to the executable or is compiled into
//! it. Lookup is two-tiered and always tries the side-by-side file first, so
//! an operator can override any bundled file by dropping a file of the same
//! name beside the binary.
//!
//! - [`ResourceResolver`] implements the ordered lookup.
//! - [`EmbeddedResources`] abstracts the compiled-in tier; [`BundledResources`]
//!   serves the files under `data/`, [`InMemoryResources`] is for tests and
//!   library callers that bring their own data.
//! - [`codec`] holds the decompress-then-deserialize step for `.bin` blobs.

pub mod codec;
mod embedded;
mod resolver;

pub use embedded::{BundledResources, EmbeddedResources, InMemoryResources};
pub use resolver::{ResourceOrigin, ResourceResolver, ResourceStream};

use crate::error::{OfflineError, Result};
use std::path::PathBuf;

/// Namespace prefix applied to logical names when looking up embedded data.
pub const DEFAULT_RESOURCE_NAMESPACE: &str = "Microsoft.Fx.Portability.Offline.data.";

/// Logical name of the mandatory API catalog.
pub const CATALOG_FILE: &str = "catalog.bin";

/// Logical name of the optional known-exceptions catalog.
pub const EXCEPTIONS_FILE: &str = "exceptions.bin";

/// Directory containing the running executable.
pub fn application_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(std::path::Path::to_path_buf)
        .ok_or_else(|| OfflineError::config(format!("executable path has no parent: {}", exe.display())))
}
