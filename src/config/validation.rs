//! Configuration validation.

use super::types::{DataConfig, FrameworkConfig, OfflineConfig, PluginConfig};
use crate::analyzer::PublicKeyToken;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for OfflineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.data.validate());
        errors.extend(self.plugins.validate());
        errors.extend(self.framework.validate());
        errors
    }
}

impl Validatable for DataConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref dir) = self.application_dir {
            if !dir.is_dir() {
                errors.push(ConfigError::new(
                    "data.application_dir",
                    format!("Not a directory: {}", dir.display()),
                ));
            }
        }
        if let Some(ref dir) = self.working_dir {
            if !dir.is_dir() {
                errors.push(ConfigError::new(
                    "data.working_dir",
                    format!("Not a directory: {}", dir.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for PluginConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.prefix.trim().is_empty() {
            errors.push(ConfigError::new("plugins.prefix", "Prefix must not be empty"));
        }

        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            errors.push(ConfigError::new(
                "plugins.extension",
                format!("Extension must start with '.', got '{}'", self.extension),
            ));
        }

        let suffix = self.companion_suffix.to_ascii_lowercase();
        let extension = self.extension.to_ascii_lowercase();
        if suffix.len() <= extension.len() || !suffix.ends_with(&extension) {
            errors.push(ConfigError::new(
                "plugins.companion_suffix",
                format!(
                    "Companion suffix '{}' must end with the plugin extension '{}'",
                    self.companion_suffix, self.extension
                ),
            ));
        }

        errors
    }
}

impl Validatable for FrameworkConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (i, token) in self.public_key_tokens.iter().enumerate() {
            if let Err(e) = token.parse::<PublicKeyToken>() {
                errors.push(ConfigError::new(
                    format!("framework.public_key_tokens[{i}]"),
                    e.to_string(),
                ));
            }
        }

        for (i, prefix) in self.name_prefixes.iter().enumerate() {
            if prefix.is_empty() {
                // An empty prefix would classify every assembly as framework
                errors.push(ConfigError::new(
                    format!("framework.name_prefixes[{i}]"),
                    "Prefix must not be empty",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OfflineConfig::default().is_valid());
    }

    #[test]
    fn test_bad_token_reported() {
        let framework = FrameworkConfig {
            public_key_tokens: vec!["b77a5c561934e089".into(), "xyz".into()],
            ..FrameworkConfig::default()
        };
        let errors = framework.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "framework.public_key_tokens[1]");
    }

    #[test]
    fn test_plugin_rules() {
        let plugins = PluginConfig {
            prefix: " ".into(),
            extension: "dll".into(),
            companion_suffix: ".views.exe".into(),
            ..PluginConfig::default()
        };
        let fields: Vec<String> = plugins.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["plugins.prefix", "plugins.extension", "plugins.companion_suffix"]
        );
    }

    #[test]
    fn test_empty_name_prefix_rejected() {
        let framework = FrameworkConfig {
            name_prefixes: vec![String::new()],
            ..FrameworkConfig::default()
        };
        assert!(!framework.is_valid());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let data = DataConfig {
            working_dir: Some("/definitely/not/here".into()),
            ..DataConfig::default()
        };
        assert_eq!(data.validate()[0].field, "data.working_dir");
    }
}
