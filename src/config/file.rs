//! Configuration file loading and discovery.

use super::types::OfflineConfig;
use crate::resources::application_dir;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file; used when no explicit path is given.
pub const CONFIG_ENV: &str = "APIPORT_CONFIG";

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".apiport.yaml",
    ".apiport.yml",
    "apiport.yaml",
    "apiport.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided, else `$APIPORT_CONFIG`
/// 2. Current directory
/// 3. Directory of the running executable
/// 4. User config directory (~/.config/apiport/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    let requested = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    discover_in(requested.as_deref(), &search_dirs())
}

fn search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    search.extend(std::env::current_dir().ok());
    search.extend(application_dir().ok());
    search.extend(dirs::config_dir().map(|dir| dir.join("apiport")));
    search.extend(dirs::home_dir());
    search
}

fn discover_in(requested: Option<&Path>, search: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = requested {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::debug!("Config file {} does not exist, searching defaults", path.display());
    }
    search.iter().find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load an `OfflineConfig` from a YAML file.
///
/// Relative directories in the file are taken relative to the file itself.
pub fn load_config_file(path: &Path) -> Result<OfflineConfig, ConfigFileError> {
    if !path.is_file() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: OfflineConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if let Some(base) = path.parent() {
        resolve_relative_dirs(&mut config, base);
    }
    Ok(config)
}

fn resolve_relative_dirs(config: &mut OfflineConfig, base: &Path) {
    for dir in [
        &mut config.data.application_dir,
        &mut config.data.working_dir,
        &mut config.plugins.directory,
    ]
    .into_iter()
    .flatten()
    {
        if dir.is_relative() {
            *dir = base.join(&*dir);
        }
    }
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (OfflineConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (OfflineConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                (OfflineConfig::default(), None)
            }
        },
    )
}

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = OfflineConfig::default();
    format!(
        r"# apiport offline configuration
# Place this file at .apiport.yaml in your project root or ~/.config/apiport/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".apiport.yaml");
        std::fs::write(&config_path, "plugins:\n  extension: .so\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_dotfile() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("apiport.yml"), "").unwrap();
        std::fs::write(tmp.path().join(".apiport.yml"), "").unwrap();

        assert_eq!(
            find_config_in_dir(tmp.path()),
            Some(tmp.path().join(".apiport.yml"))
        );
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
data:
  working_dir: /src/contoso
framework:
  public_key_tokens: ["b77a5c561934e089"]
  legacy_names: []
  name_prefixes: ["Contoso."]
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.data.working_dir, Some(PathBuf::from("/src/contoso")));
        assert_eq!(config.framework.name_prefixes, vec!["Contoso.".to_string()]);
        assert!(config.framework.legacy_names.is_empty());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "plugins: [not, a, map").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, OfflineConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("resource_namespace"));
        assert!(example.contains("companion_suffix"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "data: {}\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }

    #[test]
    fn test_missing_requested_file_falls_through_to_search_dirs() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("apiport.yml"), "").unwrap();
        let search = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        assert_eq!(
            discover_in(Some(&first.path().join("gone.yaml")), &search),
            Some(second.path().join("apiport.yml"))
        );
        assert_eq!(discover_in(None, &search[..1]), None);
    }

    #[test]
    fn test_relative_dirs_resolve_against_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".apiport.yaml");
        std::fs::write(
            &config_path,
            "data:\n  working_dir: src\n  application_dir: /opt/apiport\nplugins:\n  directory: ./plugins\n",
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.data.working_dir, Some(tmp.path().join("src")));
        assert_eq!(config.data.application_dir, Some(PathBuf::from("/opt/apiport")));
        assert_eq!(config.plugins.directory, Some(tmp.path().join("./plugins")));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "data: [1, 2").unwrap();

        let err = load_config_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }
}
