//! The portlet type descriptor.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::DescriptorError;
use super::escape::escape_java;
use super::hash_key::{title_key, tooltip_key};

/// Describes one discovered portlet type.
///
/// Built once from an annotated declaration and immutable afterwards. The two
/// hash keys are derived from `id`, `title` and `tooltip` at construction.
///
/// # Equality and Ordering
///
/// Equality and hashing cover the six input fields. Generated output is ordered
/// with [`compare_by_class_name`](Self::compare_by_class_name), which looks only at
/// the canonical class name. The [`Ord`] impl orders by canonical class name first
/// and breaks ties on the remaining fields so that it stays consistent with `Eq`
/// inside ordered sets.
///
/// # Examples
///
/// ```rust
/// use portletgen::descriptor::PortletTypeDescriptor;
///
/// # fn example() -> Result<(), portletgen::descriptor::DescriptorError> {
/// let descriptor = PortletTypeDescriptor::new(
///     "edu.example.portlets.EntityTreePortlet",
///     "EntityTreePortlet",
///     "edu.example.portlets",
///     "portlets.EntityTree",
///     "Entity Tree",
///     "Browse the class hierarchy",
/// )?;
/// assert_eq!(descriptor.title_hash().len(), 32);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PortletTypeDescriptor {
    package_name: String,
    canonical_class_name: String,
    simple_name: String,
    id: String,
    title: String,
    tooltip: String,
    title_hash: String,
    tooltip_hash: String,
}

impl PortletTypeDescriptor {
    /// Create a validated descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::EmptyField`] if any input is empty and
    /// [`DescriptorError::QuotedField`] if `id`, `title` or `tooltip` starts or ends
    /// with a double quote (an already-quoted value would produce a broken literal).
    pub fn new(
        canonical_class_name: impl Into<String>,
        simple_name: impl Into<String>,
        package_name: impl Into<String>,
        id: impl Into<String>,
        title: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> Result<Self, DescriptorError> {
        let canonical_class_name = canonical_class_name.into();
        let simple_name = simple_name.into();
        let package_name = package_name.into();
        let id = id.into();
        let title = title.into();
        let tooltip = tooltip.into();

        require_non_empty("canonicalClassName", &canonical_class_name)?;
        require_non_empty("simpleName", &simple_name)?;
        require_non_empty("packageName", &package_name)?;
        require_unquoted("id", &id)?;
        require_unquoted("title", &title)?;
        require_unquoted("tooltip", &tooltip)?;

        let title_hash = title_key(&id, &title);
        let tooltip_hash = tooltip_key(&id, &tooltip);

        Ok(Self {
            package_name,
            canonical_class_name,
            simple_name,
            id,
            title,
            tooltip,
            title_hash,
            tooltip_hash,
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn canonical_class_name(&self) -> &str {
        &self.canonical_class_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Stable translation key for the title.
    pub fn title_hash(&self) -> &str {
        &self.title_hash
    }

    /// Stable translation key for the tooltip.
    pub fn tooltip_hash(&self) -> &str {
        &self.tooltip_hash
    }

    /// The id escaped for a Java string literal.
    #[must_use]
    pub fn escaped_id(&self) -> String {
        escape_java(&self.id)
    }

    /// The title escaped for a Java string literal.
    #[must_use]
    pub fn escaped_title(&self) -> String {
        escape_java(&self.title)
    }

    /// The tooltip escaped for a Java string literal.
    #[must_use]
    pub fn escaped_tooltip(&self) -> String {
        escape_java(&self.tooltip)
    }

    /// Order by canonical class name alone.
    pub fn compare_by_class_name(&self, other: &Self) -> Ordering {
        self.canonical_class_name.cmp(&other.canonical_class_name)
    }

    fn key(&self) -> (&str, &str, &str, &str, &str, &str) {
        (
            &self.canonical_class_name,
            &self.simple_name,
            &self.package_name,
            &self.id,
            &self.title,
            &self.tooltip,
        )
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DescriptorError> {
    if value.is_empty() {
        return Err(DescriptorError::EmptyField {
            field,
        });
    }
    Ok(())
}

fn require_unquoted(field: &'static str, value: &str) -> Result<(), DescriptorError> {
    require_non_empty(field, value)?;
    if value.starts_with('"') || value.ends_with('"') {
        return Err(DescriptorError::QuotedField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl PartialEq for PortletTypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PortletTypeDescriptor {}

impl Hash for PortletTypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Ord for PortletTypeDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_by_class_name(other).then_with(|| self.key().cmp(&other.key()))
    }
}

impl PartialOrd for PortletTypeDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PortletTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PortletTypeDescriptor{{{}, {}, {}, {}, {}}}",
            self.id, self.title, self.canonical_class_name, self.package_name, self.simple_name
        )
    }
}
