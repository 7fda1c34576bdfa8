//! apiport-offline: offline data tool for the API portability analyzer
//!
//! Inspects the bundled or side-by-side catalog, breaking-change records and
//! report plugins, and renders portability reports from API usage lists.

use anyhow::{Context, Result};
use apiport_offline::{
    cli,
    config::{self, file::load_or_default, OfflineConfig, Validatable},
    OfflineDataModule,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io::{self, Write as _};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "apiport-offline")]
#[command(version)]
#[command(about = "Offline catalog, breaking-change and report-plugin tool for API portability analysis", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show which report formats were discovered
    apiport-offline list-output-formats

    # List breaking changes in the Core category as JSON
    apiport-offline breaking-changes --category Core --json

    # Is an assembly part of the framework?
    apiport-offline classify System.Net.Http --token b03f5f7f11d50a3a

    # Render a Markdown report for a usage list
    apiport-offline report usages.json --target \".NET Core=3.1\" -f markdown")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file [falls back to $APIPORT_CONFIG]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory searched for side-by-side data files and plugins
    #[arg(long, global = true, env = "APIPORT_APPLICATION_DIR")]
    application_dir: Option<PathBuf>,

    /// Directory whose BreakingChanges/ child enables local mode [default: application dir]
    #[arg(long, global = true)]
    working_dir: Option<PathBuf>,

    /// Directory scanned for report plugins
    #[arg(long, global = true)]
    plugin_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the report formats contributed by discovered plugins
    ListOutputFormats,

    /// List breaking changes from the local directory or embedded data
    BreakingChanges {
        /// Only show records in this category (repeatable)
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the API catalog
    Catalog,

    /// List known API exceptions
    Exceptions,

    /// Classify an assembly as framework or third-party
    Classify {
        /// Assembly simple name
        name: String,

        /// Public key token as 16 hex digits
        #[arg(long)]
        token: Option<String>,
    },

    /// Render a portability report for a JSON list of API usages
    Report {
        /// JSON array of {doc_id, assembly, public_key_token}
        usages: PathBuf,

        /// Application name shown in the report
        #[arg(long)]
        name: Option<String>,

        /// Target platform as NAME=VERSION (repeatable; default: latest of each)
        #[arg(long = "target", value_name = "TARGET", value_parser = cli::parse_target)]
        targets: Vec<apiport_offline::TargetPlatform>,

        /// Output format name or extension
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as YAML
    ConfigShow,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn effective_config(cli: &Cli) -> OfflineConfig {
    let (mut config, loaded_from) = load_or_default(cli.config.as_deref());
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    if let Some(ref dir) = cli.application_dir {
        config.data.application_dir = Some(dir.clone());
    }
    if let Some(ref dir) = cli.working_dir {
        config.data.working_dir = Some(dir.clone());
    }
    if let Some(ref dir) = cli.plugin_dir {
        config.plugins.directory = Some(dir.clone());
    }
    for error in config.validate() {
        tracing::warn!("Config: {}", error);
    }
    config
}

fn load_module(cli: &Cli) -> Result<OfflineDataModule> {
    OfflineDataModule::from_config(effective_config(cli)).context("failed to initialize offline data")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "apiport-offline", &mut out);
            Ok(())
        }

        Commands::ConfigSchema { ref output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => writeln!(out, "{schema}")?,
            }
            Ok(())
        }

        Commands::ConfigShow => {
            let config = effective_config(&cli);
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            write!(out, "{yaml}")?;
            Ok(())
        }

        Commands::ListOutputFormats => cli::run_list_output_formats(&load_module(&cli)?, &mut out),

        Commands::BreakingChanges {
            ref categories,
            json,
        } => cli::run_breaking_changes(&load_module(&cli)?, categories, json, &mut out),

        Commands::Catalog => cli::run_catalog(&load_module(&cli)?, &mut out),

        Commands::Exceptions => cli::run_exceptions(&load_module(&cli)?, &mut out),

        Commands::Classify {
            ref name,
            ref token,
        } => cli::run_classify(&load_module(&cli)?, name, token.as_deref(), &mut out).map(|_| ()),

        Commands::Report {
            ref usages,
            ref name,
            ref targets,
            ref format,
            ref output,
        } => {
            let args = cli::ReportArgs {
                usages: usages.clone(),
                name: name.clone(),
                targets: targets.clone(),
                format: format.clone(),
                output: output.clone(),
            };
            cli::run_report(&load_module(&cli)?, &args, &mut out)
        }
    }
}
