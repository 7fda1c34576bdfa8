//! `catalog` and `exceptions` command handlers.

use crate::offline::OfflineDataModule;
use anyhow::{Context, Result};
use std::io::Write;

/// Summarize the API catalog.
pub fn run_catalog(module: &OfflineDataModule, out: &mut dyn Write) -> Result<()> {
    let catalog = module.load_catalog().context("failed to load API catalog")?;

    writeln!(out, "Built by:      {}", catalog.built_by)?;
    writeln!(
        out,
        "Last modified: {}",
        catalog.last_modified.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "APIs:          {}", catalog.len())?;
    writeln!(out, "Targets:")?;
    for target in &catalog.supported_targets {
        writeln!(out, "  {target}")?;
    }
    Ok(())
}

/// List known exceptions, if the optional data is present.
pub fn run_exceptions(module: &OfflineDataModule, out: &mut dyn Write) -> Result<()> {
    let data = module
        .load_additional_data()
        .context("failed to load exception data")?;

    if data.is_empty() {
        writeln!(out, "No exception data available")?;
        return Ok(());
    }

    for record in &data.exceptions {
        writeln!(out, "{}", record.doc_id)?;
        for info in &record.exceptions {
            write!(
                out,
                "  {} {}: {}",
                info.platform, info.version, info.exception
            )?;
            if let Some(ref rid) = info.rid {
                write!(out, " [{rid}]")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
