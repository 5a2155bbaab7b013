//! Template sources for the generated Java files.
//!
//! The built-in templates are embedded at compile time. A template directory
//! may override either of them by providing a file with the same name.

use std::fs;
use std::path::Path;

use crate::constants::{FACTORY_TEMPLATE, MODULE_TEMPLATE};
use crate::core::PortletGenError;

const BUILTIN_FACTORY: &str = include_str!("../../templates/PortletFactoryGenerated.java.tera");
const BUILTIN_MODULE: &str = include_str!("../../templates/PortletModuleGenerated.java.tera");

/// The factory and module template sources used by one generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub factory: String,
    pub module: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    /// The embedded templates.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            factory: BUILTIN_FACTORY.to_string(),
            module: BUILTIN_MODULE.to_string(),
        }
    }

    /// The embedded templates, replaced by any same-named file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PortletGenError::TemplateError`] if `dir` is not a directory or
    /// an override exists but cannot be read.
    pub fn with_overrides(dir: &Path) -> Result<Self, PortletGenError> {
        if !dir.is_dir() {
            return Err(PortletGenError::TemplateError {
                template: dir.display().to_string(),
                reason: "template directory does not exist".to_string(),
            });
        }

        let mut templates = Self::builtin();
        if let Some(factory) = read_override(dir, FACTORY_TEMPLATE)? {
            templates.factory = factory;
        }
        if let Some(module) = read_override(dir, MODULE_TEMPLATE)? {
            templates.module = module;
        }
        Ok(templates)
    }
}

fn read_override(dir: &Path, name: &str) -> Result<Option<String>, PortletGenError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Ok(None);
    }
    tracing::debug!("Using template override {}", path.display());
    fs::read_to_string(&path).map(Some).map_err(|e| PortletGenError::TemplateError {
        template: path.display().to_string(),
        reason: e.to_string(),
    })
}
