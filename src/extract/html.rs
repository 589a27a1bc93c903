//! Text helpers for reading items straight out of HTML markup.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script.*?>.*?</script>").unwrap());

static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style.*?>.*?</style>").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<[^>]+>").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n]+").unwrap());

/// Plain text of an HTML fragment.
///
/// Drops `<script>`/`<style>` blocks and every remaining tag, decodes named,
/// decimal and hexadecimal entities, turns non-breaking spaces into plain
/// spaces and collapses runs of whitespace.
///
/// ```ignore
/// assert_eq!(clean_text("<b>Tech &amp; Sci</b>"), "Tech & Sci");
/// ```
pub fn clean_text(fragment: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(fragment, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let without_tags = TAG_RE.replace_all(&without_styles, "");
    let decoded = decode_html_entities(&without_tags).replace('\u{00A0}', " ");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Collapse whitespace in already-extracted element text.
pub fn squash_whitespace(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(&text.replace('\u{00A0}', " "), " ")
        .trim()
        .to_string()
}

/// Resolve an `href` against the site's origin.
///
/// Protocol-relative (`//host/path`) and root-relative (`/path`) forms are
/// rewritten against `origin`; absolute URLs pass through. Script
/// pseudo-links, in-page anchors and empty values resolve to `None`.
pub fn resolve_href(origin: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    origin.join(href).ok()
}

/// Whether `url` is served from `domain` or one of its subdomains.
pub fn host_matches(url: &Url, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    url.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}
