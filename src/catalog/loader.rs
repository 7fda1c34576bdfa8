//! Loading the catalog blobs through the resource resolver.

use super::model::{AdditionalDataCatalog, ApiCatalog, ApiException};
use crate::error::{ErrorContext, Result};
use crate::resources::{codec, ResourceResolver, CATALOG_FILE, EXCEPTIONS_FILE};

const MISSING_EXCEPTIONS_NOTICE: &str =
    "Unable to find exceptions.bin so exceptions will not be included in report.";

/// Fetches and decodes `catalog.bin` and `exceptions.bin`.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    resolver: ResourceResolver,
}

impl CatalogLoader {
    pub fn new(resolver: ResourceResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub const fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Load the mandatory API catalog. Every failure propagates.
    pub fn load_catalog(&self) -> Result<ApiCatalog> {
        let stream = self.resolver.open(CATALOG_FILE)?;
        let catalog: ApiCatalog = codec::decompress_to_object(stream, CATALOG_FILE)
            .context("loading API catalog")?;
        tracing::debug!(
            "Loaded catalog built by {} with {} APIs",
            catalog.built_by,
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load the optional known-exceptions catalog.
    ///
    /// Absence is reported as an informational notice and yields an empty
    /// catalog; that includes a not-found failure between the existence probe
    /// and the open. Decode failures still propagate.
    pub fn load_additional_data(&self) -> Result<AdditionalDataCatalog> {
        if !self.resolver.has_local_file(EXCEPTIONS_FILE)
            && !self.resolver.has_embedded(EXCEPTIONS_FILE)
        {
            tracing::info!("{MISSING_EXCEPTIONS_NOTICE}");
            return Ok(AdditionalDataCatalog::default());
        }

        let loaded = self.resolver.open(EXCEPTIONS_FILE).and_then(|stream| {
            codec::decompress_to_object::<Vec<ApiException>>(stream, EXCEPTIONS_FILE)
        });

        match loaded {
            Ok(exceptions) => {
                tracing::debug!("Loaded {} API exception records", exceptions.len());
                Ok(AdditionalDataCatalog::new(exceptions))
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("{MISSING_EXCEPTIONS_NOTICE}");
                Ok(AdditionalDataCatalog::default())
            }
            Err(e) => Err(e).context("loading additional data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ExceptionInfo, TargetPlatform};
    use crate::resources::InMemoryResources;
    use chrono::Utc;
    use std::sync::Arc;

    fn loader(dir: &std::path::Path, embedded: InMemoryResources) -> CatalogLoader {
        CatalogLoader::new(ResourceResolver::new(dir, "NS.", Arc::new(embedded)))
    }

    fn catalog_blob() -> Vec<u8> {
        let catalog = ApiCatalog::new(
            "unit",
            Utc::now(),
            vec![TargetPlatform::new(".NET Core", "3.1")],
            Vec::new(),
        );
        codec::compress_object(&catalog).expect("compress")
    }

    #[test]
    fn test_load_catalog_from_embedded() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let l = loader(dir.path(), InMemoryResources::new().with("NS.catalog.bin", catalog_blob()));
        let catalog = l.load_catalog().expect("catalog");
        assert_eq!(catalog.built_by, "unit");
    }

    #[test]
    fn test_missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = loader(dir.path(), InMemoryResources::new())
            .load_catalog()
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.resource_name(), Some("catalog.bin"));
    }

    #[test]
    fn test_missing_exceptions_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let data = loader(dir.path(), InMemoryResources::new())
            .load_additional_data()
            .expect("soft failure");
        assert!(data.is_empty());
    }

    #[test]
    fn test_exceptions_loaded_from_side_by_side_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let records = vec![ApiException {
            doc_id: "M:System.Console.get_WindowWidth".into(),
            exceptions: vec![ExceptionInfo {
                platform: ".NET Core".into(),
                version: "3.1".into(),
                exception: "System.PlatformNotSupportedException".into(),
                rid: Some("linux-x64".into()),
            }],
        }];
        std::fs::write(
            dir.path().join("exceptions.bin"),
            codec::compress_object(&records).expect("compress"),
        )
        .expect("write");

        let data = loader(dir.path(), InMemoryResources::new())
            .load_additional_data()
            .expect("load");
        assert_eq!(data.exceptions, records);
    }

    #[test]
    fn test_corrupt_exceptions_propagates() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("exceptions.bin"), b"not zstd").expect("write");
        let err = loader(dir.path(), InMemoryResources::new())
            .load_additional_data()
            .unwrap_err();
        assert!(!err.is_not_found());
    }
}
