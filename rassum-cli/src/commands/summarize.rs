//! Summarize command - write the plan/flow/geometry cross-reference report

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rassum_core::export::default_output_path;
use rassum_core::{write_report_file, Config, Inventory, ProjectLocation};

/// Arguments for the summarize command
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Project file (.prj), or a project directory named like its .prj file
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// Report file to write (defaults to "<project> Project Summary_<time>.<ext>")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the default report file (overrides config and env)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Skip flow, geometry and plan files with truncated headers instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

impl SummarizeArgs {
    /// Execute the summarize command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let location = ProjectLocation::resolve(&self.project)
            .with_context(|| format!("Cannot open project {}", self.project.display()))?;

        let format = config.report.format;
        let output = match &self.output {
            Some(path) => path.clone(),
            None => {
                let dir = config.report.output_dir.as_ref().unwrap_or(&location.dir);
                default_output_path(dir, &location.base_name, format)
            }
        };

        println!(
            "Processing {} from the directory {}",
            location.index_file_name(),
            location.dir.display()
        );
        println!("Output will be stored in {}", output.display());

        let inventory = Inventory::collect(location, &config.scan)?;
        for path in &inventory.skipped {
            println!("Skipped malformed file {}", path.display());
        }

        let report = inventory.report()?;
        let summary = report.summary;

        write_report_file(&report, format, &output)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;

        println!("Processed {} plan files", summary.plans);
        println!(
            "Found {} flow files.  {} are not used by any plans.",
            summary.flows, summary.unused_flows
        );
        println!(
            "Found {} geometry files.  {} are not used by any plans.",
            summary.geometries, summary.unused_geometries
        );
        println!("Project summary written to {}", output.display());

        Ok(())
    }
}
