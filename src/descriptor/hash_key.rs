//! Stable translation keys for portlet text.
//!
//! A key is the MD5 digest of `context + text` encoded as UTF-8, rendered as 32
//! uppercase hex digits. The context is the portlet id followed by a field
//! discriminator (`"title"` or `"tooltip"`), so the same text used by two portlets
//! yields two different keys.
//!
//! The digest is a lookup token for externalized text, not a security boundary.

use md5::{Digest, Md5};

use crate::constants::{TITLE_HASH_CONTEXT, TOOLTIP_HASH_CONTEXT};

/// Compute the stable key for `text` in `context`.
///
/// Pure function of its inputs; identical on every platform and run.
///
/// # Examples
///
/// ```rust
/// use portletgen::descriptor::hash_key;
///
/// // MD5("abc")
/// assert_eq!(hash_key("c", "ab"), "900150983CD24FB0D6963F7D28E17F72");
/// ```
#[must_use]
pub fn hash_key(text: &str, context: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(context.as_bytes());
    hasher.update(text.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Key for a portlet title: context is `id + "title"`.
#[must_use]
pub fn title_key(id: &str, title: &str) -> String {
    hash_key(title, &format!("{id}{TITLE_HASH_CONTEXT}"))
}

/// Key for a portlet tooltip: context is `id + "tooltip"`.
#[must_use]
pub fn tooltip_key(id: &str, tooltip: &str) -> String {
    hash_key(tooltip, &format!("{id}{TOOLTIP_HASH_CONTEXT}"))
}
