//! Turning annotated declarations into validated descriptors.
//!
//! Names (package, simple, canonical) always come from the declaration. The
//! component marker must supply `id`, `title` and `tooltip` as string literals;
//! the module marker may supply any number of class literals. Any failure is a
//! [`ValidationError`] naming the declaration, and the declaration is dropped.

use strsim::levenshtein;

use crate::core::ValidationError;
use crate::descriptor::{PortletModuleDescriptor, PortletTypeDescriptor};
use crate::extractor::AnnotatedDeclaration;
use crate::scanner::{AnnotationArguments, AnnotationValue};

/// Largest edit distance for which a supplied key is suggested for a missing one.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Build a portlet type descriptor from a declaration carrying the component marker.
///
/// # Errors
///
/// Fails when `id`, `title` or `tooltip` is missing or not a string literal, or when
/// the values violate the descriptor invariants.
pub fn build_type_descriptor(
    annotated: &AnnotatedDeclaration<'_>,
) -> Result<PortletTypeDescriptor, ValidationError> {
    let declaration = annotated.declaration;
    let invalid = |reason: String| {
        ValidationError::new(
            declaration.canonical_name.clone(),
            Some(declaration.location.clone()),
            reason,
        )
    };

    let id = required_string(annotated.arguments, "id").map_err(invalid)?;
    let title = required_string(annotated.arguments, "title").map_err(invalid)?;
    let tooltip = required_string(annotated.arguments, "tooltip").map_err(invalid)?;

    PortletTypeDescriptor::new(
        declaration.canonical_name.clone(),
        declaration.simple_name.clone(),
        declaration.package_name.clone(),
        id,
        title,
        tooltip,
    )
    .map_err(|e| invalid(e.to_string()))
}

/// Build a module descriptor from a declaration carrying the module marker.
///
/// Every argument must be a class literal or an array of class literals; the
/// bindings keep source order across all arguments.
///
/// # Errors
///
/// Fails when an argument is anything other than a class literal, or when the
/// declaration is in the default package.
pub fn build_module_descriptor(
    annotated: &AnnotatedDeclaration<'_>,
) -> Result<PortletModuleDescriptor, ValidationError> {
    let declaration = annotated.declaration;
    let invalid = |reason: String| {
        ValidationError::new(
            declaration.canonical_name.clone(),
            Some(declaration.location.clone()),
            reason,
        )
    };

    let mut bindings = Vec::new();
    for (key, value) in annotated.arguments.iter() {
        collect_types(key, value, &mut bindings).map_err(invalid)?;
    }

    PortletModuleDescriptor::new(
        declaration.canonical_name.clone(),
        declaration.simple_name.clone(),
        declaration.package_name.clone(),
        bindings,
    )
    .map(|module| module.with_on_demand_imports(declaration.on_demand_imports.clone()))
    .map_err(|e| invalid(e.to_string()))
}

fn collect_types(
    key: &str,
    value: &AnnotationValue,
    bindings: &mut Vec<String>,
) -> Result<(), String> {
    match value {
        AnnotationValue::Type(name) => {
            bindings.push(name.clone());
            Ok(())
        }
        AnnotationValue::Array(items) => {
            items.iter().try_for_each(|item| collect_types(key, item, bindings))
        }
        other => Err(format!(
            "argument '{key}' must be a class literal or an array of class literals, found {}",
            other.describe()
        )),
    }
}

fn required_string(arguments: &AnnotationArguments, key: &str) -> Result<String, String> {
    match arguments.get(key) {
        Some(AnnotationValue::String(value)) => Ok(value.clone()),
        Some(other) => Err(format!("'{key}' must be a string literal, found {}", other.describe())),
        None => {
            let mut message = format!("missing required argument '{key}'");
            if let Some(suggestion) = closest_key(arguments, key) {
                message.push_str(&format!(" (did you mean '{suggestion}'?)"));
            }
            Err(message)
        }
    }
}

fn closest_key<'a>(arguments: &'a AnnotationArguments, key: &str) -> Option<&'a str> {
    arguments
        .keys()
        .map(|candidate| (candidate, levenshtein(candidate, key)))
        .filter(|(_, distance)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}
