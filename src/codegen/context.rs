//! Template context for the generated Java sources.
//!
//! The views flatten descriptors into plain serializable values. Escaping and
//! hash keys are computed here so templates only substitute.
//!
//! # Factory template variables
//!
//! ```text
//! package                 target package of the factory
//! class_name              simple name of the factory class
//! portlets[]              sorted by canonical_class_name
//!   .canonical_class_name .simple_name .package_name
//!   .id                   raw id (use the java_string filter)
//!   .escaped_title        .escaped_tooltip
//!   .title_hash           .tooltip_hash
//! modules[]               sorted by canonical_class_name
//!   .canonical_class_name .package_name .generated_simple_name
//!   .generated_class_name fully qualified generated glue class
//!   .bindings[]           type names, fully qualified or as written in the module
//!   .on_demand_imports[]  `a.b` for each `import a.b.*;` of the module file
//! ```
//!
//! The module template receives a single `module` with the same fields. Its
//! glue class lives in the module's package, so bindings written relative to
//! that package or `java.lang` resolve as they do in the module source.

use serde::Serialize;

use crate::descriptor::{PortletModuleDescriptor, PortletTypeDescriptor};

#[derive(Debug, Clone, Serialize)]
pub struct PortletView {
    pub canonical_class_name: String,
    pub simple_name: String,
    pub package_name: String,
    pub id: String,
    pub escaped_title: String,
    pub escaped_tooltip: String,
    pub title_hash: String,
    pub tooltip_hash: String,
}

impl From<&PortletTypeDescriptor> for PortletView {
    fn from(descriptor: &PortletTypeDescriptor) -> Self {
        Self {
            canonical_class_name: descriptor.canonical_class_name().to_string(),
            simple_name: descriptor.simple_name().to_string(),
            package_name: descriptor.package_name().to_string(),
            id: descriptor.id().to_string(),
            escaped_title: descriptor.escaped_title(),
            escaped_tooltip: descriptor.escaped_tooltip(),
            title_hash: descriptor.title_hash().to_string(),
            tooltip_hash: descriptor.tooltip_hash().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleView {
    pub canonical_class_name: String,
    pub package_name: String,
    pub generated_simple_name: String,
    pub generated_class_name: String,
    pub bindings: Vec<String>,
    pub on_demand_imports: Vec<String>,
}

impl From<&PortletModuleDescriptor> for ModuleView {
    fn from(descriptor: &PortletModuleDescriptor) -> Self {
        let generated_simple_name = descriptor.generated_simple_name();
        Self {
            canonical_class_name: descriptor.canonical_class_name().to_string(),
            package_name: descriptor.package_name().to_string(),
            generated_class_name: format!("{}.{}", descriptor.package_name(), generated_simple_name),
            generated_simple_name,
            bindings: descriptor.bindings().to_vec(),
            on_demand_imports: descriptor.on_demand_imports().to_vec(),
        }
    }
}

/// Context for the factory template.
#[derive(Debug, Clone, Serialize)]
pub struct FactoryContext<'a> {
    pub package: &'a str,
    pub class_name: &'a str,
    pub portlets: &'a [PortletView],
    pub modules: &'a [ModuleView],
}

/// Context for one module template.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleContext<'a> {
    pub module: &'a ModuleView,
}
