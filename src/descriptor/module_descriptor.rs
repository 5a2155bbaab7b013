//! The module registration descriptor.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::DescriptorError;
use crate::constants::MODULE_CLASS_SUFFIX;

/// Describes one class that registers portlet bindings with a module.
///
/// Identity is the canonical class name: equality, hashing and ordering ignore
/// the binding list.
#[derive(Debug, Clone, Serialize)]
pub struct PortletModuleDescriptor {
    canonical_class_name: String,
    simple_name: String,
    package_name: String,
    bindings: Vec<String>,
    on_demand_imports: Vec<String>,
}

impl PortletModuleDescriptor {
    /// Create a validated module descriptor.
    ///
    /// `bindings` are type names in source order, fully qualified or as written in
    /// the module's package.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::EmptyField`] if a name is empty or a binding is blank.
    pub fn new(
        canonical_class_name: impl Into<String>,
        simple_name: impl Into<String>,
        package_name: impl Into<String>,
        bindings: Vec<String>,
    ) -> Result<Self, DescriptorError> {
        let canonical_class_name = canonical_class_name.into();
        let simple_name = simple_name.into();
        let package_name = package_name.into();

        for (field, value) in [
            ("canonicalClassName", &canonical_class_name),
            ("simpleName", &simple_name),
            ("packageName", &package_name),
        ] {
            if value.is_empty() {
                return Err(DescriptorError::EmptyField {
                    field,
                });
            }
        }
        if bindings.iter().any(|b| b.trim().is_empty()) {
            return Err(DescriptorError::EmptyField {
                field: "bindings",
            });
        }

        Ok(Self {
            canonical_class_name,
            simple_name,
            package_name,
            bindings,
            on_demand_imports: Vec::new(),
        })
    }

    /// Attach the module file's on-demand import prefixes (`a.b` for `import a.b.*;`).
    ///
    /// Bindings left as written resolve through these in the generated glue.
    #[must_use]
    pub fn with_on_demand_imports(mut self, imports: Vec<String>) -> Self {
        self.on_demand_imports = imports;
        self
    }

    pub fn canonical_class_name(&self) -> &str {
        &self.canonical_class_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    pub fn on_demand_imports(&self) -> &[String] {
        &self.on_demand_imports
    }

    /// Simple name of the glue class generated for this module.
    ///
    /// Nested modules flatten their enclosing names with `_`, so
    /// `a.Outer.Inner` becomes `Outer_InnerGenerated`.
    #[must_use]
    pub fn generated_simple_name(&self) -> String {
        let nested = self
            .canonical_class_name
            .strip_prefix(&self.package_name)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.simple_name);
        format!("{}{}", nested.replace('.', "_"), MODULE_CLASS_SUFFIX)
    }
}

impl PartialEq for PortletModuleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_class_name == other.canonical_class_name
    }
}

impl Eq for PortletModuleDescriptor {}

impl Hash for PortletModuleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_class_name.hash(state);
    }
}

impl Ord for PortletModuleDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_class_name.cmp(&other.canonical_class_name)
    }
}

impl PartialOrd for PortletModuleDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PortletModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.canonical_class_name, self.bindings.join(", "))
    }
}
