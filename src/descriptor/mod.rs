//! Immutable descriptors for discovered portlets and module registrations.
//!
//! A [`PortletTypeDescriptor`] summarises one class annotated with the component
//! marker: its names, its id, title and tooltip, and two stable hash keys used as
//! translation lookup tokens. A [`PortletModuleDescriptor`] summarises one class
//! annotated with the module-registration marker and the binding types it lists.
//!
//! Both types validate their inputs at construction and never change afterwards.
//! They are held in memory for one generation run only.
//!
//! # Modules
//!
//! - `type_descriptor` - [`PortletTypeDescriptor`]
//! - `module_descriptor` - [`PortletModuleDescriptor`]
//! - `hash_key` - [`hash_key`], the stable key derivation
//! - `escape` - [`escape_java`], string literal escaping

mod escape;
mod hash_key;
mod module_descriptor;
mod type_descriptor;

pub use escape::escape_java;
pub use hash_key::{hash_key, title_key, tooltip_key};
pub use module_descriptor::PortletModuleDescriptor;
pub use type_descriptor::PortletTypeDescriptor;

use thiserror::Error;

/// Why a descriptor could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// A required field is empty
    #[error("'{field}' must not be empty")]
    EmptyField {
        /// Field name as it appears in the annotation or declaration
        field: &'static str,
    },

    /// A text field begins or ends with a double quote
    #[error("'{field}' must not begin or end with a double quote (found {value})")]
    QuotedField {
        /// Field name
        field: &'static str,
        /// The rejected value
        value: String,
    },
}
