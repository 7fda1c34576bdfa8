//! `list-output-formats` command handler.

use crate::offline::OfflineDataModule;
use anyhow::Result;
use std::io::Write;

/// Print one line per discovered report format.
pub fn run_list_output_formats(module: &OfflineDataModule, out: &mut dyn Write) -> Result<()> {
    let formats = module.report_writers().formats();
    if formats.is_empty() {
        writeln!(
            out,
            "No report writers found in {}",
            module.application_dir().display()
        )?;
        return Ok(());
    }

    writeln!(out, "Available output formats:")?;
    for format in formats {
        writeln!(
            out,
            "  - {:<12} {:<20} {}",
            format.display_name, format.mime_type, format.file_extension
        )?;
    }
    Ok(())
}
