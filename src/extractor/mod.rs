//! Selection of declarations carrying the portlet marker annotations.
//!
//! Two independent passes run over the same declaration list: one for the
//! component-descriptor marker and one for the module-registration marker. A
//! declaration may appear in both results, in one, or in neither.

use std::collections::BTreeMap;

use crate::scanner::{AnnotationArguments, Declaration};

/// Matches annotations written in source against a configured marker name.
///
/// The configured name may be simple (`Portlet`) or fully qualified
/// (`edu.example.Portlet`). A written annotation matches when it equals the
/// configured name exactly, or when it is unqualified and equals the configured
/// simple name.
///
/// # Examples
///
/// ```rust
/// use portletgen::extractor::AnnotationMatcher;
///
/// let matcher = AnnotationMatcher::new("edu.example.Portlet");
/// assert!(matcher.matches("Portlet"));
/// assert!(matcher.matches("edu.example.Portlet"));
/// assert!(!matcher.matches("other.Portlet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMatcher {
    name: String,
}

impl AnnotationMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn matches(&self, written: &str) -> bool {
        written == self.name || (!written.contains('.') && written == self.simple_name())
    }
}

/// A declaration paired with the arguments of the marker that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedDeclaration<'a> {
    pub declaration: &'a Declaration,
    pub arguments: &'a AnnotationArguments,
}

/// Runs the component and module extraction passes.
#[derive(Debug, Clone)]
pub struct AnnotatedDeclarationExtractor {
    component: AnnotationMatcher,
    module: AnnotationMatcher,
}

impl AnnotatedDeclarationExtractor {
    pub fn new(component_annotation: &str, module_annotation: &str) -> Self {
        Self {
            component: AnnotationMatcher::new(component_annotation),
            module: AnnotationMatcher::new(module_annotation),
        }
    }

    /// Declarations annotated with the component marker, sorted by canonical name.
    pub fn find_portlet_declarations<'a>(
        &self,
        declarations: &'a [Declaration],
    ) -> Vec<AnnotatedDeclaration<'a>> {
        extract(&self.component, declarations)
    }

    /// Declarations annotated with the module-registration marker, sorted by canonical name.
    pub fn find_module_declarations<'a>(
        &self,
        declarations: &'a [Declaration],
    ) -> Vec<AnnotatedDeclaration<'a>> {
        extract(&self.module, declarations)
    }
}

/// Collapse by canonical name; the first occurrence of a declaration (and the
/// first matching annotation on it) wins.
fn extract<'a>(
    matcher: &AnnotationMatcher,
    declarations: &'a [Declaration],
) -> Vec<AnnotatedDeclaration<'a>> {
    let mut selected: BTreeMap<&'a str, AnnotatedDeclaration<'a>> = BTreeMap::new();

    for declaration in declarations {
        let Some(annotation) = declaration.annotations.iter().find(|a| matcher.matches(&a.name))
        else {
            continue;
        };

        if selected.contains_key(declaration.canonical_name.as_str()) {
            tracing::debug!(
                "Ignoring duplicate @{} declaration {}",
                matcher.name(),
                declaration
            );
            continue;
        }

        tracing::debug!("Found @{} on {}", matcher.name(), declaration.canonical_name);
        selected.insert(
            &declaration.canonical_name,
            AnnotatedDeclaration {
                declaration,
                arguments: &annotation.arguments,
            },
        );
    }

    selected.into_values().collect()
}
