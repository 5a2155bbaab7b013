//! The `generate` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use crate::config::ConfigOverrides;
use crate::core::DiagnosticKind;
use crate::orchestrator::{GenerationReport, PortletGenerator};
use crate::writer::{DirectorySourceWriter, MemorySourceWriter};

/// Scan source roots and write the generated sources.
#[derive(Args, Debug, Default)]
pub struct GenerateCommand {
    /// Java source root to scan (repeatable; replaces configured roots)
    #[arg(short = 's', long = "source-root", value_name = "DIR")]
    source_roots: Vec<PathBuf>,

    /// Output directory for generated sources
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Package of the generated factory class
    #[arg(short, long)]
    package: Option<String>,

    /// Directory with template overrides
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Glob of source-root-relative paths to skip (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Render everything but write nothing
    #[arg(long)]
    dry_run: bool,
}

impl GenerateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let dry_run = self.dry_run;
        let config = cli.load_generator_config(self.into_overrides()).await?;
        let output_dir = config.output_dir.clone();
        let generator = PortletGenerator::new(config);

        let report = if dry_run {
            let mut writer = MemorySourceWriter::new();
            let report = generator.run(&mut writer).await?;
            for path in writer.paths() {
                tracing::info!("Would write {}", output_dir.join(path).display());
            }
            report
        } else {
            let mut writer = DirectorySourceWriter::new(&output_dir);
            generator.run(&mut writer).await?
        };

        print_summary(&report, &output_dir, dry_run);
        Ok(())
    }

    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            source_roots: self.source_roots,
            output_dir: self.output,
            package: self.package,
            templates: self.templates,
            exclude: self.exclude,
        }
    }
}

fn print_summary(report: &GenerationReport, output_dir: &std::path::Path, dry_run: bool) {
    let verb = if dry_run { "Would generate" } else { "Generated" };
    println!(
        "{} {} {} file(s) for {} portlet(s) and {} module(s) in {}",
        "✓".green(),
        verb,
        report.written.len(),
        report.portlet_types.len(),
        report.modules.len(),
        output_dir.display()
    );

    let skipped_files = report.diagnostics.count(DiagnosticKind::Parse);
    let rejected = report.diagnostics.count(DiagnosticKind::Validation);
    if skipped_files > 0 {
        println!("{} {} file(s) could not be parsed", "⚠".yellow(), skipped_files);
    }
    if rejected > 0 {
        println!("{} {} declaration(s) were invalid and skipped", "✗".red(), rejected);
    }
}
