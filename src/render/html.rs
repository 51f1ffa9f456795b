//! render::html
//!
//! HTML serialization helpers.

use std::borrow::Cow;

/// Tags serialized without a closing tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"` and `'`. Returns a borrowed reference if no
/// escaping is needed.
///
/// # Example
///
/// ```
/// use groundwork::render::html::escape;
///
/// assert_eq!(escape("Tom & Jerry's <deck>"), "Tom &amp; Jerry&#x27;s &lt;deck&gt;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(s: &str) -> Cow<'_, str> {
    if s.contains(['&', '<', '>', '"', '\'']) {
        let mut escaped = String::with_capacity(s.len() + 8);
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(s)
    }
}

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}
