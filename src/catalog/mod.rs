//! API catalog and known-exception data.
//!
//! [`CatalogLoader`] resolves `catalog.bin` (mandatory) and `exceptions.bin`
//! (optional) through a [`crate::resources::ResourceResolver`] and decodes
//! them into [`ApiCatalog`] and [`AdditionalDataCatalog`].

mod loader;
mod model;

pub use loader::CatalogLoader;
pub use model::{
    AdditionalDataCatalog, ApiCatalog, ApiDefinition, ApiException, ApiKind, ExceptionInfo,
    TargetPlatform,
};
