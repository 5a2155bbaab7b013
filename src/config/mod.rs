//! Generator configuration.
//!
//! Settings come from an optional `portletgen.toml` and are then overridden by
//! command line flags. Every key is optional:
//!
//! ```toml
//! source_roots = ["src/main/java"]
//! output_dir = "target/generated-sources/portletgen"
//! package = "edu.stanford.bmir.protege.web.client.portlet"
//! component_annotation = "Portlet"
//! module_annotation = "ProjectModulePlugin"
//! exclude = ["**/generated/**"]
//! templates = "codegen-templates"
//! ```
//!
//! # Resolution rules
//!
//! - Relative paths in the file resolve against the file's directory.
//! - Relative paths from the command line resolve against the working directory.
//! - `--source-root` flags replace the configured roots instead of appending.
//! - Without `--config`, `./portletgen.toml` is used when it exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_COMPONENT_ANNOTATION, DEFAULT_MODULE_ANNOTATION, DEFAULT_OUTPUT_DIR,
    DEFAULT_PACKAGE,
};
use crate::core::PortletGenError;

/// Dotted sequence of Java identifiers.
const QUALIFIED_NAME_PATTERN: &str = r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directories scanned for `.java` files.
    pub source_roots: Vec<PathBuf>,

    /// Root directory the generated sources are written under.
    pub output_dir: PathBuf,

    /// Package of the generated factory class.
    pub package: String,

    /// Name of the component-descriptor marker, simple or qualified.
    pub component_annotation: String,

    /// Name of the module-registration marker, simple or qualified.
    pub module_annotation: String,

    /// Globs matched against paths relative to each source root.
    pub exclude: Vec<String>,

    /// Directory whose templates override the built-in ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_roots: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            package: DEFAULT_PACKAGE.to_string(),
            component_annotation: DEFAULT_COMPONENT_ANNOTATION.to_string(),
            module_annotation: DEFAULT_MODULE_ANNOTATION.to_string(),
            exclude: Vec::new(),
            templates: None,
        }
    }
}

/// Values supplied on the command line. `None` / empty leaves the file value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source_roots: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub package: Option<String>,
    pub templates: Option<PathBuf>,
    pub exclude: Vec<String>,
}

impl GeneratorConfig {
    /// Load the configuration from `path`, resolving relative paths against its directory.
    ///
    /// # Errors
    ///
    /// - [`PortletGenError::ConfigNotFound`] if the file does not exist
    /// - [`PortletGenError::ConfigParseError`] for invalid TOML or unknown keys
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PortletGenError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self =
            toml::from_str(&content).map_err(|e| PortletGenError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.message().to_string(),
            })?;

        let base = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        config.resolve_relative_to(base);
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given, otherwise `./portletgen.toml` if present, otherwise defaults.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::load_from`].
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path).await;
        }

        let discovered = Path::new(CONFIG_FILE_NAME);
        if discovered.is_file() {
            Self::load_from(discovered).await
        } else {
            tracing::debug!("No {CONFIG_FILE_NAME} found, using defaults");
            Ok(Self::default())
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        self.source_roots.iter_mut().for_each(resolve);
        resolve(&mut self.output_dir);
        if let Some(templates) = self.templates.as_mut() {
            resolve(templates);
        }
    }

    /// Apply command line overrides on top of the file values.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if !overrides.source_roots.is_empty() {
            self.source_roots = overrides.source_roots;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(package) = overrides.package {
            self.package = package;
        }
        if let Some(templates) = overrides.templates {
            self.templates = Some(templates);
        }
        self.exclude.extend(overrides.exclude);
    }

    /// Check the package, marker names and exclude patterns.
    ///
    /// Source roots are checked separately when the run starts.
    ///
    /// # Errors
    ///
    /// - [`PortletGenError::InvalidPackageName`] for a malformed package
    /// - [`PortletGenError::ConfigError`] for a malformed marker name
    /// - [`PortletGenError::InvalidExcludePattern`] for a malformed glob
    pub fn validate(&self) -> Result<(), PortletGenError> {
        let qualified_name =
            Regex::new(QUALIFIED_NAME_PATTERN).map_err(|e| PortletGenError::ConfigError {
                message: e.to_string(),
            })?;

        if !qualified_name.is_match(&self.package) {
            return Err(PortletGenError::InvalidPackageName {
                package: self.package.clone(),
            });
        }

        for (key, name) in [
            ("component_annotation", &self.component_annotation),
            ("module_annotation", &self.module_annotation),
        ] {
            if !qualified_name.is_match(name) {
                return Err(PortletGenError::ConfigError {
                    message: format!("'{key}' is not a valid annotation name: '{name}'"),
                });
            }
        }

        self.exclude_patterns().map(|_| ())
    }

    /// Compile the exclude globs.
    ///
    /// # Errors
    ///
    /// Returns [`PortletGenError::InvalidExcludePattern`] for the first invalid glob.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, PortletGenError> {
        self.exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|e| PortletGenError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                })
            })
            .collect()
    }
}
