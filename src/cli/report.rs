//! `report` command handler.

use crate::catalog::TargetPlatform;
use crate::offline::{ApiUsage, OfflineDataModule};
use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Inputs of the `report` command.
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// JSON array of API usages
    pub usages: PathBuf,
    /// Application name shown in the report; defaults to the usages file stem
    pub name: Option<String>,
    pub targets: Vec<TargetPlatform>,
    /// Format name or extension of a registered report writer
    pub format: String,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Parse a target as `Name=Version` or `Name,Version=vX.Y`.
pub fn parse_target(s: &str) -> Result<TargetPlatform> {
    let s = s.trim();
    if let Some((name, version)) = s.split_once(",Version=") {
        let version = version.trim_start_matches(['v', 'V']);
        if !name.is_empty() && !version.is_empty() {
            return Ok(TargetPlatform::new(name.trim(), version.trim()));
        }
    } else if let Some((name, version)) = s.rsplit_once('=') {
        if !name.trim().is_empty() && !version.trim().is_empty() {
            return Ok(TargetPlatform::new(name.trim(), version.trim()));
        }
    }
    bail!("Invalid target '{s}'. Expected NAME=VERSION, e.g. \".NET Core=3.1\"")
}

/// Analyze a usages file and render the report with the selected writer.
pub fn run_report(module: &OfflineDataModule, args: &ReportArgs, out: &mut dyn Write) -> Result<()> {
    let writer = module.report_writer(&args.format).ok_or_else(|| {
        let available: Vec<String> = module
            .report_writers()
            .formats()
            .into_iter()
            .map(|f| f.display_name)
            .collect();
        anyhow!(
            "No report writer for format '{}'. Available: {}",
            args.format,
            if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            }
        )
    })?;

    let file = File::open(&args.usages)
        .with_context(|| format!("failed to open {}", args.usages.display()))?;
    let usages: Vec<ApiUsage> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.usages.display()))?;

    let name = args.name.clone().unwrap_or_else(|| {
        args.usages
            .file_stem()
            .map_or_else(|| "application".to_string(), |s| s.to_string_lossy().into_owned())
    });

    let report = module.build_report(&name, &usages, &args.targets)?;
    tracing::info!(
        "{} framework API(s) analyzed, {} missing on at least one target",
        report.analyzed_api_count,
        report.missing_apis.len()
    );

    match args.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut buffered = BufWriter::new(file);
            writer.write_report(&report, &mut buffered)?;
            buffered.flush()?;
            tracing::info!("Report written to {}", path.display());
        }
        None => writer.write_report(&report, out)?,
    }
    Ok(())
}
