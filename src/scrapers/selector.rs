//! Server-rendered boards read with CSS selectors.
//!
//! Baidu's realtime board renders titles and links in separate elements, so we
//! select both lists and pair them by position.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::html::squash_whitespace;
use crate::models::HotItem;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Per-source settings for the CSS selector adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Selector whose elements' text are the titles.
    pub title_selector: String,
    /// Selector whose elements' `href` attributes are the links.
    pub link_selector: String,
}

/// Parse a page into at most [`MAX_ITEMS`] items.
///
/// Relative links are resolved against `page_url`. A missing link element or
/// `href` leaves the item's link empty.
pub fn parse(html: &str, page_url: &str, settings: &Settings) -> Result<Vec<HotItem>, ScrapeError> {
    let title_selector = parse_selector(&settings.title_selector)?;
    let link_selector = parse_selector(&settings.link_selector)?;
    let base = Url::parse(page_url).ok();

    let document = Html::parse_document(html);
    let titles: Vec<String> = document
        .select(&title_selector)
        .map(|element| squash_whitespace(&element.text().collect::<String>()))
        .collect();
    let links: Vec<String> = document
        .select(&link_selector)
        .map(|element| {
            element
                .value()
                .attr("href")
                .map(|href| resolve(base.as_ref(), href))
                .unwrap_or_default()
        })
        .collect();
    debug!(titles = titles.len(), links = links.len(), "Selected board elements");

    Ok(titles
        .into_iter()
        .enumerate()
        .filter_map(|(i, title)| HotItem::new(title, links.get(i).cloned().unwrap_or_default()))
        .take(MAX_ITEMS)
        .collect())
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{selector}: {e}")))
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    base.and_then(|b| b.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| href.to_string())
}
