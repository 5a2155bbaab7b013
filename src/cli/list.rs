//! The `list` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use super::CliConfig;
use crate::config::ConfigOverrides;
use crate::descriptor::{PortletModuleDescriptor, PortletTypeDescriptor};
use crate::orchestrator::{PortletGenerator, ScanOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Scan source roots and print the discovered descriptors.
#[derive(Args, Debug, Default)]
pub struct ListCommand {
    /// Java source root to scan (repeatable; replaces configured roots)
    #[arg(short = 's', long = "source-root", value_name = "DIR")]
    source_roots: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    portlets: Vec<&'a PortletTypeDescriptor>,
    modules: Vec<&'a PortletModuleDescriptor>,
    diagnostics: Vec<String>,
}

impl ListCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let overrides = ConfigOverrides {
            source_roots: self.source_roots,
            ..ConfigOverrides::default()
        };
        let config = cli.load_generator_config(overrides).await?;
        let outcome = PortletGenerator::new(config).scan().await?;

        let rendered = match self.format {
            OutputFormat::Text => render_text(&outcome),
            OutputFormat::Json => render_json(&outcome)?,
        };
        print!("{rendered}");
        Ok(())
    }
}

fn render_json(outcome: &ScanOutcome) -> Result<String> {
    let output = ListOutput {
        portlets: outcome.portlet_types.iter().collect(),
        modules: outcome.modules.iter().collect(),
        diagnostics: outcome.diagnostics.iter().map(ToString::to_string).collect(),
    };
    let mut json = serde_json::to_string_pretty(&output).context("Failed to serialize descriptors")?;
    json.push('\n');
    Ok(json)
}

fn render_text(outcome: &ScanOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} ({})\n", "Portlets".bold(), outcome.portlet_types.len()));
    for portlet in &outcome.portlet_types {
        out.push_str(&format!(
            "  {} {} {}\n",
            portlet.id().cyan(),
            portlet.canonical_class_name(),
            format!("\"{}\"", portlet.title()).dimmed()
        ));
    }

    out.push_str(&format!("{} ({})\n", "Modules".bold(), outcome.modules.len()));
    for module in &outcome.modules {
        out.push_str(&format!("  {module}\n"));
    }

    if !outcome.diagnostics.is_empty() {
        out.push_str(&format!("{} ({})\n", "Problems".bold().yellow(), outcome.diagnostics.len()));
        for diagnostic in outcome.diagnostics.iter() {
            out.push_str(&format!("  {diagnostic}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        outcome.portlet_types.insert(
            PortletTypeDescriptor::new("p.A", "A", "p", "portlets.A", "Alpha", "First").unwrap(),
        );
        outcome
            .modules
            .insert(PortletModuleDescriptor::new("p.M", "M", "p", vec!["p.X".into()]).unwrap());
        outcome
    }

    #[test]
    fn test_render_text() {
        colored::control::set_override(false);
        let text = render_text(&outcome());
        assert!(text.contains("Portlets (1)"));
        assert!(text.contains("portlets.A p.A \"Alpha\""));
        assert!(text.contains("Modules (1)"));
        assert!(text.contains("p.M [p.X]"));
        assert!(!text.contains("Problems"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["portlets"][0]["id"], "portlets.A");
        assert_eq!(value["portlets"][0]["canonical_class_name"], "p.A");
        assert_eq!(value["modules"][0]["bindings"][0], "p.X");
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 0);
    }
}
