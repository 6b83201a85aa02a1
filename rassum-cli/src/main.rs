//! rassum CLI - Command line interface for project summaries
//!
//! Cross-references the plan, flow and geometry files of a river-model
//! project and writes a summary table.

mod commands;

use clap::{Parser, Subcommand};
use rassum_core::{Config, OutputFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::SummarizeArgs;

/// rassum: summarize the plans, flows and geometries of a project
#[derive(Parser, Debug)]
#[command(name = "rassum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Report format: xlsx, csv or json (overrides config and env)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Write a summary report for a project
    #[command(visible_alias = "s")]
    Summarize(SummarizeArgs),

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("rassum {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Summarize(args)) => {
            let config = Config::load_with_overrides(
                cli.format,
                args.output_dir.clone(),
                args.skip_malformed,
            )?;

            if cli.verbose {
                tracing::info!(
                    format = %config.report.format,
                    output_dir = ?config.report.output_dir,
                    skip_malformed = config.scan.skip_malformed,
                    "Configuration loaded"
                );
            }

            args.execute(&config)?;
        }
        Some(Commands::Config) => {
            let config = Config::load_with_overrides(cli.format, None, false)?;

            println!("rassum Configuration");
            println!("====================");
            println!();
            println!("Report Settings:");
            println!("  format: {}", config.report.format);
            println!(
                "  output_dir: {}",
                config
                    .report
                    .output_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(project directory)".to_string())
            );
            println!();
            println!("Scan Settings:");
            println!("  skip_malformed: {}", config.scan.skip_malformed);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("rassum - Summarize the plans, flows and geometries of a river-model project");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
