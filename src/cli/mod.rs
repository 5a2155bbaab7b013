//! Command-line interface for portletgen.
//!
//! # Commands
//!
//! - `generate` - scan source roots and write the generated Java sources
//! - `list` - scan source roots and print the discovered descriptors
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - configuration file (default `./portletgen.toml` if present)
//!
//! `RUST_LOG` takes precedence over both logging flags.
//!
//! # Examples
//!
//! ```bash
//! portletgen generate --source-root src/main/java --output target/generated-sources/portletgen
//! portletgen list --format json
//! portletgen --config build/portletgen.toml generate --dry-run
//! ```

mod generate;
mod list;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigOverrides, GeneratorConfig};

/// Settings derived from the global flags, applied before any command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter; `RUST_LOG` overrides it.
    pub log_level: String,

    /// Explicit configuration file, if any.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Load the configuration file and apply command line overrides.
    ///
    /// # Errors
    ///
    /// Fails if the configuration file is missing (when given explicitly) or invalid.
    pub async fn load_generator_config(
        &self,
        overrides: ConfigOverrides,
    ) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(self.config_path.as_deref()).await?;
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }
}

/// Generates the portlet registry from annotated Java sources.
#[derive(Parser, Debug)]
#[command(
    name = "portletgen",
    about = "Generate a portlet registry from annotated Java sources",
    version,
    long_about = "portletgen scans Java source roots for @Portlet and @ProjectModulePlugin \
                  declarations and generates a factory class listing every portlet type \
                  plus registration glue for every portlet module."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan source roots and write the generated sources
    Generate(generate::GenerateCommand),

    /// Scan source roots and print the discovered descriptors
    List(list::ListCommand),
}

impl Cli {
    /// Initialize logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Propagates any fatal error from the command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the command with an already-built [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Propagates any fatal error from the command.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config).await,
        }
    }
}
