//! Configuration for the offline data layer.
//!
//! One [`OfflineConfig`] drives every loader: where side-by-side data files
//! live, which directory may hold a local `BreakingChanges/` tree, how report
//! plugins are recognised, and which assemblies count as framework.
//!
//! # Configuration File
//!
//! Place an `.apiport.yaml` file in your project root or `~/.config/apiport/`:
//!
//! ```yaml
//! data:
//!   working_dir: ./src
//! plugins:
//!   directory: /opt/apiport/plugins
//! framework:
//!   name_prefixes: ["System.", "Microsoft.Win32."]
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{DataConfig, FrameworkConfig, OfflineConfig, OfflineConfigBuilder, PluginConfig};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the configuration file format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(OfflineConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_json_schema();
        let value: serde_json::Value = serde_json::from_str(&schema).expect("valid json");
        let properties = &value["properties"];
        assert!(properties.get("data").is_some());
        assert!(properties.get("plugins").is_some());
        assert!(properties.get("framework").is_some());
    }
}
