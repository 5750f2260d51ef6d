//! Minimal HTML denylist for rendered WordPress fragments.
//!
//! This strips the two element families the site refuses to embed; it is
//! not a hardening boundary and makes no attempt at general HTML
//! sanitization.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script pattern compiles"));
static IFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe>").expect("iframe pattern compiles"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Maximum length of a page meta description
const DESCRIPTION_LIMIT: usize = 160;

/// Removes `<script>` and `<iframe>` blocks, case-insensitively. All
/// other markup passes through untouched.
pub fn strip_denylisted(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, "");
    IFRAME_RE.replace_all(&without_scripts, "").into_owned()
}

/// Collapses an excerpt fragment into plain text for page metadata:
/// tags stripped, whitespace trimmed, truncated to 160 characters.
pub fn meta_description(excerpt_html: &str) -> String {
    TAG_RE
        .replace_all(excerpt_html, "")
        .trim()
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}
