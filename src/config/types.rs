//! Configuration types for the offline data layer.

use crate::plugins::REPORTS_PREFIX;
use crate::resources::DEFAULT_RESOURCE_NAMESPACE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, loaded from a YAML file or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OfflineConfig {
    /// Where catalog and breaking-change data is looked up
    pub data: DataConfig,
    /// Report plugin discovery
    pub plugins: PluginConfig,
    /// Tables deciding which assemblies belong to the framework
    pub framework: FrameworkConfig,
}

impl OfflineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `OfflineConfig` builder.
    pub fn builder() -> OfflineConfigBuilder {
        OfflineConfigBuilder::default()
    }
}

/// Builder for `OfflineConfig`.
#[derive(Debug, Default)]
#[must_use]
pub struct OfflineConfigBuilder {
    config: OfflineConfig,
}

impl OfflineConfigBuilder {
    /// Directory searched for side-by-side data files.
    pub fn application_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data.application_dir = Some(dir.into());
        self
    }

    /// Directory whose `BreakingChanges/` child enables local mode.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data.working_dir = Some(dir.into());
        self
    }

    /// Directory scanned for report plugins.
    pub fn plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.plugins.directory = Some(dir.into());
        self
    }

    pub fn resource_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.data.resource_namespace = namespace.into();
        self
    }

    pub fn framework(mut self, framework: FrameworkConfig) -> Self {
        self.config.framework = framework;
        self
    }

    #[must_use]
    pub fn build(self) -> OfflineConfig {
        self.config
    }
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataConfig {
    /// Directory searched for side-by-side `catalog.bin` / `exceptions.bin`.
    /// Defaults to the directory of the running executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_dir: Option<PathBuf>,
    /// Directory whose `BreakingChanges/` child switches breaking-change
    /// loading to local mode. Defaults to the application directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    /// Prefix prepended to a logical file name to form its embedded
    /// resource name
    pub resource_namespace: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            application_dir: None,
            working_dir: None,
            resource_namespace: DEFAULT_RESOURCE_NAMESPACE.to_string(),
        }
    }
}

/// Report plugin discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PluginConfig {
    /// Directory scanned for plugins. Defaults to the application directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Required filename prefix
    pub prefix: String,
    /// Required file extension, including the dot
    pub extension: String,
    /// Suffix of generated companion binaries
    pub companion_suffix: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: None,
            prefix: REPORTS_PREFIX.to_string(),
            extension: ".dll".to_string(),
            companion_suffix: ".views.dll".to_string(),
        }
    }
}

/// Classifier tables for framework assemblies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Public key tokens of framework signing keys, 16 hex digits each
    pub public_key_tokens: Vec<String>,
    /// Exact assembly names treated as framework, case-insensitive
    pub legacy_names: Vec<String>,
    /// Assembly name prefixes treated as framework, case-insensitive
    pub name_prefixes: Vec<String>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            public_key_tokens: [
                "b77a5c561934e089",
                "b03f5f7f11d50a3a",
                "31bf3856ad364e35",
                "7cec85d7bea7798e",
                "cc7b13ffcd2ddd51",
                "adb9793829ddae60",
                "71e9bce111e9429c",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            legacy_names: vec!["mscorlib".to_string()],
            name_prefixes: [
                "System.",
                "Microsoft.AspNet.",
                "Microsoft.AspNetCore.",
                "Microsoft.CSharp.",
                "Microsoft.EntityFrameworkCore.",
                "Microsoft.Win32.",
                "Microsoft.VisualBasic.",
                "Windows.",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: OfflineConfig =
            serde_yaml::from_str("plugins:\n  extension: .so\n").expect("parse");
        assert_eq!(config.plugins.extension, ".so");
        assert_eq!(config.plugins.prefix, REPORTS_PREFIX);
        assert_eq!(config.framework, FrameworkConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = OfflineConfig::builder()
            .application_dir("/opt/apiport")
            .working_dir("/src/app")
            .build();
        assert_eq!(config.data.application_dir, Some(PathBuf::from("/opt/apiport")));
        assert_eq!(config.data.working_dir, Some(PathBuf::from("/src/app")));
        assert!(config.plugins.directory.is_none());
    }
}
