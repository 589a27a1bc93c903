//! Ranked link lists on pages with no stable markup.
//!
//! IT之家's front page carries a daily ranking (`日榜`) whose class names change
//! with every redesign. Instead of selectors we look for the section label and
//! read every `<a href="...">title</a>` after it, keeping only links back into
//! the site.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::html::{clean_text, host_matches, resolve_href};
use crate::models::HotItem;
use html_escape::decode_html_entities;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s+[^>]*href\s*=\s*"([^"]+)"[^>]*>(.*?)</a>"#).unwrap()
});

/// Per-source settings for the anchor-scanning adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Label that starts the section of interest, matched case-insensitively.
    pub section_marker: String,
    /// Canonical origin used to resolve relative links, e.g. `https://www.ithome.com`.
    pub origin: String,
    /// Links must point at this domain or one of its subdomains.
    pub domain: String,
    /// Tab and menu labels that look like items but are not.
    #[serde(default)]
    pub menu_labels: Vec<String>,
}

/// Parse a page into at most [`MAX_ITEMS`] distinct items found after the
/// section marker.
pub fn parse(html: &str, settings: &Settings) -> Result<Vec<HotItem>, ScrapeError> {
    let origin = Url::parse(&settings.origin)?;
    let marker = RegexBuilder::new(&regex::escape(&settings.section_marker))
        .case_insensitive(true)
        .build()?;

    let Some(found) = marker.find(html) else {
        info!(marker = %settings.section_marker, "Section marker not found in page");
        return Ok(Vec::new());
    };
    let section = &html[found.start()..];
    debug!(offset = found.start(), bytes = section.len(), "Scanning section for anchors");

    Ok(ANCHOR_RE
        .captures_iter(section)
        .filter_map(|caps| {
            let title = clean_text(&caps[2]);
            let href = decode_html_entities(&caps[1]);
            let link = resolve_href(&origin, &href)?;
            is_item(&title, &link, settings)
                .then(|| HotItem::new(title, link.to_string()))
                .flatten()
        })
        .unique()
        .take(MAX_ITEMS)
        .collect())
}

fn is_item(title: &str, link: &Url, settings: &Settings) -> bool {
    !title.is_empty()
        && !settings.menu_labels.iter().any(|label| label == title)
        && host_matches(link, &settings.domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            section_marker: "日榜".to_string(),
            origin: "https://www.ithome.com".to_string(),
            domain: "ithome.com".to_string(),
            menu_labels: vec!["日榜".into(), "周榜".into(), "月榜".into()],
        }
    }

    #[test]
    fn test_reads_links_after_marker() {
        let html = r##"
            <div class="nav"><a href="/0/999.htm">Before the section</a></div>
            <div class="rank">
              <ul class="tab"><li><a href="#d">日榜</a></li><li><a href="javascript:;">周榜</a></li><li><a href="/week">周榜</a></li></ul>
              <ul>
                <li><a href="//www.ithome.com/0/1.htm" target="_blank"><span>First</span> story</a></li>
                <li><a title="x" href="/0/2.htm">Tech &amp; Sci&#34;ence&#39;s</a></li>
                <li><a href="https://ad.example.com/click">Sponsored</a></li>
                <li><a href="https://m.ithome.com/3.htm">Mobile   story</a></li>
              </ul>
            </div>"##;

        let items = parse(html, &settings()).unwrap();
        assert_eq!(
            items,
            vec![
                HotItem::new("First story", "https://www.ithome.com/0/1.htm").unwrap(),
                HotItem::new("Tech & Sci\"ence's", "https://www.ithome.com/0/2.htm").unwrap(),
                HotItem::new("Mobile story", "https://m.ithome.com/3.htm").unwrap(),
            ]
        );
    }

    #[test]
    fn test_duplicates_removed_and_capped() {
        let mut html = String::from("<h2>日榜</h2>");
        for i in 0..15 {
            html.push_str(&format!(r#"<a href="/0/{i}.htm">Story {i}</a>"#));
            html.push_str(&format!(r#"<a href="/0/{i}.htm">Story {i}</a>"#));
        }

        let items = parse(&html, &settings()).unwrap();
        assert_eq!(items.len(), MAX_ITEMS);
        assert_eq!(items[1].title(), "Story 1");
        assert_eq!(items[9].link(), "https://www.ithome.com/0/9.htm");
    }

    #[test]
    fn test_same_title_different_link_kept() {
        let html = r#"日榜<a href="/a.htm">Same</a><a href="/b.htm">Same</a>"#;
        assert_eq!(parse(html, &settings()).unwrap().len(), 2);
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let s = Settings {
            section_marker: "Daily Top".to_string(),
            menu_labels: vec![],
            ..settings()
        };
        let html = r#"<h3>DAILY TOP</h3><a href="/x.htm">Story</a>"#;
        assert_eq!(parse(html, &s).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_marker_is_empty() {
        let html = r#"<a href="/0/1.htm">Story</a>"#;
        assert!(parse(html, &settings()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_origin_is_error() {
        let s = Settings {
            origin: "not a url".to_string(),
            ..settings()
        };
        assert!(matches!(parse("日榜", &s), Err(ScrapeError::Origin(_))));
    }

    #[test]
    fn test_entity_encoded_href() {
        let html = r#"日榜<a href="/search?a=1&amp;b=2">Query</a>"#;
        let items = parse(html, &settings()).unwrap();
        assert_eq!(items[0].link(), "https://www.ithome.com/search?a=1&b=2");
    }
}
