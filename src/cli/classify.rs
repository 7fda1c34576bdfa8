//! `classify` command handler.

use crate::analyzer::{DependencyFilter, PublicKeyToken};
use crate::offline::OfflineDataModule;
use anyhow::Result;
use std::io::Write;

/// Outcome of classifying one assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Framework,
    ThirdParty,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Framework => write!(f, "framework"),
            Self::ThirdParty => write!(f, "third-party"),
        }
    }
}

/// Classify an assembly by name and optional public key token.
pub fn run_classify(
    module: &OfflineDataModule,
    name: &str,
    token: Option<&str>,
    out: &mut dyn Write,
) -> Result<Classification> {
    let token = match token {
        Some(hex) => hex.parse::<PublicKeyToken>()?,
        None => PublicKeyToken::EMPTY,
    };

    let classification = if module.filter().is_framework_assembly(Some(name), &token) {
        Classification::Framework
    } else {
        Classification::ThirdParty
    };
    writeln!(out, "{name}: {classification}")?;
    Ok(classification)
}
