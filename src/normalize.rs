//! Fragment cleanup applied to every slide before assembly.
//!
//! The upstream slide generator wraps list item text as
//! `<li><p><span style="...">text</span></p></li>`, which Chrome prints with
//! paragraph margins inside every bullet. The rewrite hoists the span style
//! onto the `<li>` and drops the wrappers. It is a purely syntactic pass:
//! line-wrapped or attribute-reordered variants are left untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static STYLED_LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<li>\s*<p>\s*<span style=['"]([^'"]+)['"]>([^\n\r\x{2028}\x{2029}]*?)</span>\s*</p>\s*</li>"#)
        .expect("styled list item pattern is valid")
});

/// Rewrite every `<li><p><span style=..>TEXT</span></p></li>` in `fragment`
/// to `<li style="..">TEXT</li>`.
///
/// Returns the input borrowed when nothing matched.
pub fn normalize_fragment(fragment: &str) -> Cow<'_, str> {
    STYLED_LIST_ITEM.replace_all(fragment, r#"<li style="${1}">${2}</li>"#)
}
