//! Classification of assemblies as platform-owned or third-party.

use super::public_key_token::PublicKeyToken;
use crate::config::FrameworkConfig;
use crate::error::{ErrorContext, Result};
use std::collections::HashSet;

/// Decides which assemblies belong to the platform itself.
///
/// APIs from framework assemblies are filtered out of third-party usage
/// reporting.
pub trait DependencyFilter {
    /// Whether the named assembly is part of the platform
    fn is_framework_assembly(&self, name: Option<&str>, token: &PublicKeyToken) -> bool;

    /// Whether a member defined in the named assembly is part of the platform
    fn is_framework_member(&self, name: Option<&str>, token: &PublicKeyToken) -> bool {
        self.is_framework_assembly(name, token)
    }
}

/// Immutable classification tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkDefinition {
    public_key_tokens: HashSet<PublicKeyToken>,
    legacy_names: Vec<String>,
    name_prefixes: Vec<String>,
}

impl FrameworkDefinition {
    pub fn new(
        public_key_tokens: impl IntoIterator<Item = PublicKeyToken>,
        legacy_names: impl IntoIterator<Item = String>,
        name_prefixes: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            public_key_tokens: public_key_tokens.into_iter().collect(),
            legacy_names: legacy_names.into_iter().collect(),
            name_prefixes: name_prefixes.into_iter().collect(),
        }
    }

    /// Build the tables from configuration, rejecting malformed tokens
    pub fn from_config(config: &FrameworkConfig) -> Result<Self> {
        let tokens = config
            .public_key_tokens
            .iter()
            .map(|t| t.parse::<PublicKeyToken>())
            .collect::<Result<Vec<_>>>()
            .context("framework.public_key_tokens")?;
        Ok(Self::new(
            tokens,
            config.legacy_names.iter().cloned(),
            config.name_prefixes.iter().cloned(),
        ))
    }

    #[must_use]
    pub fn is_known_token(&self, token: &PublicKeyToken) -> bool {
        self.public_key_tokens.contains(token)
    }

    /// Name rule: missing names count as framework, then legacy names,
    /// then namespace prefixes, all case-insensitive.
    #[must_use]
    pub fn is_known_name(&self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return true;
        };
        if self
            .legacy_names
            .iter()
            .any(|legacy| legacy.eq_ignore_ascii_case(name))
        {
            return true;
        }
        self.name_prefixes
            .iter()
            .any(|prefix| starts_with_ignore_ascii_case(name, prefix))
    }
}

impl Default for FrameworkDefinition {
    fn default() -> Self {
        // Defaults live in the config; they always parse.
        Self::from_config(&FrameworkConfig::default()).unwrap_or_else(|_| Self::new([], [], []))
    }
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Stateless classifier over a [`FrameworkDefinition`].
#[derive(Debug, Clone, Default)]
pub struct DotNetFrameworkFilter {
    definition: FrameworkDefinition,
}

impl DotNetFrameworkFilter {
    #[must_use]
    pub const fn new(definition: FrameworkDefinition) -> Self {
        Self { definition }
    }

    #[must_use]
    pub const fn definition(&self) -> &FrameworkDefinition {
        &self.definition
    }
}

impl DependencyFilter for DotNetFrameworkFilter {
    fn is_framework_assembly(&self, name: Option<&str>, token: &PublicKeyToken) -> bool {
        self.definition.is_known_token(token) || self.definition.is_known_name(name)
    }
}
