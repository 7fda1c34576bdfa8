//! `breaking-changes` command handler.

use crate::breaking_changes::{BreakingChange, LoadMode};
use crate::offline::OfflineDataModule;
use anyhow::{Context, Result};
use std::io::Write;

/// List breaking changes from the active source.
///
/// `categories` narrows the output to records carrying at least one of the
/// given categories, case-insensitively. This is a display filter and is
/// independent of the `BreakingChangeCategories.json` allow-list.
pub fn run_breaking_changes(
    module: &OfflineDataModule,
    categories: &[String],
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let loader = module.breaking_change_loader();
    let mode = loader.mode();
    let changes = module
        .load_breaking_changes()
        .context("failed to load breaking changes")?;

    let selected: Vec<&BreakingChange> = changes
        .iter()
        .filter(|change| {
            categories.is_empty()
                || change.categories.iter().any(|c| {
                    categories
                        .iter()
                        .any(|wanted| wanted.trim().eq_ignore_ascii_case(c.trim()))
                })
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &selected)?;
        writeln!(out)?;
        return Ok(());
    }

    match mode {
        LoadMode::Local => writeln!(out, "Source: {}", loader.local_dir().display())?,
        LoadMode::Embedded => writeln!(out, "Source: embedded data")?,
    }
    writeln!(out, "{} breaking change(s)", selected.len())?;
    for change in selected {
        write!(out, "  [{}] {}", change.id, change.title)?;
        if !change.categories.is_empty() {
            write!(out, " ({})", change.categories.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
