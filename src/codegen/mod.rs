//! Rendering of descriptor sets into Java source files.
//!
//! [`CodeGenerator::generate`] is a pure function of its inputs and the
//! template set: descriptors are sorted by class name before rendering, so the
//! same descriptor sets always yield the same bytes regardless of the order
//! they were collected in. Writing the artifacts is the caller's concern.
//!
//! Output consists of one factory artifact (always emitted, possibly empty)
//! plus one glue artifact per module descriptor.
//!
//! # Examples
//!
//! ```rust
//! use portletgen::codegen::{CodeGenerator, TemplateSet};
//! use portletgen::descriptor::PortletTypeDescriptor;
//!
//! let portlet = PortletTypeDescriptor::new(
//!     "edu.example.FooPortlet", "FooPortlet", "edu.example",
//!     "portlets.Foo", "Foo", "Shows foo",
//! ).unwrap();
//!
//! let generator = CodeGenerator::new("edu.example.gen", TemplateSet::builtin());
//! let artifacts = generator.generate([&portlet], []).unwrap();
//! assert_eq!(artifacts.len(), 1);
//! assert!(artifacts[0].contents.contains("edu.example.FooPortlet.class"));
//! ```

mod context;
pub mod filters;
mod templates;

pub use context::{ModuleView, PortletView};
pub use templates::TemplateSet;

use std::error::Error as _;
use std::path::PathBuf;

use serde::Serialize;
use tera::{Context, Tera};

use crate::constants::{FACTORY_CLASS_NAME, FACTORY_TEMPLATE, JAVA_EXTENSION, MODULE_TEMPLATE};
use crate::core::PortletGenError;
use crate::descriptor::{PortletModuleDescriptor, PortletTypeDescriptor};
use context::{FactoryContext, ModuleContext};
use filters::{JAVA_STRING_FILTER, java_string_filter};

/// One rendered source file, addressed relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GeneratedArtifact {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Renders the factory and module glue from descriptor sets.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    package: String,
    templates: TemplateSet,
}

impl CodeGenerator {
    pub fn new(package: impl Into<String>, templates: TemplateSet) -> Self {
        Self {
            package: package.into(),
            templates,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Render all artifacts for the given descriptors.
    ///
    /// Artifacts are returned sorted by relative path.
    ///
    /// # Errors
    ///
    /// Returns [`PortletGenError::TemplateError`] if a template fails to parse or
    /// render. Nothing is returned on failure.
    pub fn generate<'a, 'b>(
        &self,
        types: impl IntoIterator<Item = &'a PortletTypeDescriptor>,
        modules: impl IntoIterator<Item = &'b PortletModuleDescriptor>,
    ) -> Result<Vec<GeneratedArtifact>, PortletGenError> {
        let mut types: Vec<&PortletTypeDescriptor> = types.into_iter().collect();
        // Class name order; `Ord` breaks ties on the remaining fields
        types.sort();
        let mut modules: Vec<&PortletModuleDescriptor> = modules.into_iter().collect();
        modules.sort();
        modules.dedup();

        let tera = self.engine()?;
        let portlet_views: Vec<PortletView> = types.iter().copied().map(PortletView::from).collect();
        let module_views: Vec<ModuleView> = modules.iter().copied().map(ModuleView::from).collect();

        let mut artifacts = Vec::with_capacity(module_views.len() + 1);

        let factory = FactoryContext {
            package: &self.package,
            class_name: FACTORY_CLASS_NAME,
            portlets: &portlet_views,
            modules: &module_views,
        };
        artifacts.push(GeneratedArtifact {
            relative_path: java_path(&self.package, FACTORY_CLASS_NAME),
            contents: render(&tera, FACTORY_TEMPLATE, &factory)?,
        });

        for view in &module_views {
            artifacts.push(GeneratedArtifact {
                relative_path: java_path(&view.package_name, &view.generated_simple_name),
                contents: render(&tera, MODULE_TEMPLATE, &ModuleContext {
                    module: view,
                })?,
            });
        }

        artifacts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!(
            "Rendered {} artifact(s) for {} portlet(s) and {} module(s)",
            artifacts.len(),
            portlet_views.len(),
            module_views.len()
        );
        Ok(artifacts)
    }

    fn engine(&self) -> Result<Tera, PortletGenError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter(JAVA_STRING_FILTER, java_string_filter);
        tera.add_raw_template(FACTORY_TEMPLATE, &self.templates.factory)
            .map_err(|e| template_error(FACTORY_TEMPLATE, &e))?;
        tera.add_raw_template(MODULE_TEMPLATE, &self.templates.module)
            .map_err(|e| template_error(MODULE_TEMPLATE, &e))?;
        Ok(tera)
    }
}

fn render(tera: &Tera, template: &str, data: &impl Serialize) -> Result<String, PortletGenError> {
    let context = Context::from_serialize(data).map_err(|e| template_error(template, &e))?;
    tera.render(template, &context).map_err(|e| template_error(template, &e))
}

/// Flatten the Tera error chain; the top-level message alone rarely says what failed.
fn template_error(template: &str, error: &tera::Error) -> PortletGenError {
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    PortletGenError::TemplateError {
        template: template.to_string(),
        reason: messages.join(": "),
    }
}

/// `a.b` + `Name` -> `a/b/Name.java`
fn java_path(package: &str, simple_name: &str) -> PathBuf {
    let mut path: PathBuf = package.split('.').filter(|segment| !segment.is_empty()).collect();
    path.push(format!("{simple_name}.{JAVA_EXTENSION}"));
    path
}
