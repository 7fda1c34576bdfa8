//! Breaking change records and their loaders.
//!
//! Records come from one of two places, chosen once per
//! [`BreakingChangeLoader::load`] call:
//!
//! - **Local mode**: a `BreakingChanges/` directory exists under the loader
//!   root. Every file below it is read; `.md` files go through the markdown
//!   parser (filtered by `BreakingChangeCategories.json` when present) and
//!   `.json` files are deserialized directly.
//! - **Embedded mode**: otherwise, every embedded resource ending in `.md` or
//!   `.json` is parsed the same way, without an allow-list.

mod loader;
pub mod markdown;
mod model;

pub use loader::{
    parse_breaking_changes, BreakingChangeFormat, BreakingChangeLoader, LoadMode,
    BREAKING_CHANGES_DIR, CATEGORIES_FILE,
};
pub use model::{BreakingChange, BreakingChangeImpact, CategoryAllowList};
