//! Escaping text for Java string literals.
//!
//! The output of [`escape_java`] can be placed between double quotes in Java
//! source and the compiler reads back exactly the original text.

/// Escape `text` for embedding inside a Java string literal.
///
/// - `"` and `\` are backslash-escaped
/// - backspace, tab, newline, form feed and carriage return use their short escapes
/// - other control characters below `0x20` become `\u00XX`
/// - characters above `0x7F` become `\uXXXX`, one escape per UTF-16 code unit
/// - everything else, including `'` and `/`, is copied unchanged
///
/// Hex digits are uppercase.
///
/// # Examples
///
/// ```rust
/// use portletgen::descriptor::escape_java;
///
/// assert_eq!(escape_java("Say \"hi\"\n"), "Say \\\"hi\\\"\\n");
/// assert_eq!(escape_java("caf\u{e9}"), "caf\\u00E9");
/// ```
#[must_use]
pub fn escape_java(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\u{c}' => escaped.push_str("\\f"),
            '\r' => escaped.push_str("\\r"),
            c if (c as u32) < 0x20 => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c if (c as u32) > 0x7f => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    escaped.push_str(&format!("\\u{:04X}", unit));
                }
            }
            c => escaped.push(c),
        }
    }

    escaped
}
