//! Custom Tera filters for the Java templates.
//!
//! # Filters
//!
//! - `java_string`: escape a value for use between double quotes in Java source
//!
//! ```text
//! String id = "{{ portlet.id | java_string }}";
//! ```

use std::collections::HashMap;

use crate::descriptor::escape_java;

/// Name under which [`java_string_filter`] is registered.
pub const JAVA_STRING_FILTER: &str = "java_string";

/// Escape the input for a Java string literal.
///
/// Strings are escaped as-is; numbers and booleans are escaped from their
/// display form. Any other value is an error.
///
/// # Examples
///
/// ```rust
/// # use portletgen::codegen::filters::java_string_filter;
/// let mut tera = tera::Tera::default();
/// tera.register_filter("java_string", java_string_filter);
///
/// let mut context = tera::Context::new();
/// context.insert("title", "Say \"hi\"");
/// let rendered = tera.render_str("\"{{ title | java_string }}\"", &context).unwrap();
/// assert_eq!(rendered, r#""Say \"hi\"""#);
/// ```
pub fn java_string_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let text = match value {
        tera::Value::String(text) => text.clone(),
        tera::Value::Number(number) => number.to_string(),
        tera::Value::Bool(flag) => flag.to_string(),
        other => {
            return Err(tera::Error::msg(format!(
                "{JAVA_STRING_FILTER} filter expects a string, got {other}"
            )));
        }
    };
    Ok(tera::Value::String(escape_java(&text)))
}
