//! Data models shared by the extraction core and the run orchestrator.
//!
//! - [`HotItem`]: one normalized `(title, link)` entry, the only type the
//!   adapters hand back to their caller
//! - [`RawDocument`]: a fetched body tagged with the shape we expect it to have
//! - [`DailySnapshot`] and [`DateIndex`]: what a run writes to disk

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single hot item: a non-blank title plus a link.
///
/// The link may be empty when the source exposes a title without any usable
/// URL, but it is never absent. Instances can only be built through
/// [`HotItem::new`], which refuses blank titles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredHotItem")]
pub struct HotItem {
    title: String,
    link: String,
}

#[derive(Deserialize)]
struct StoredHotItem {
    title: String,
    #[serde(default)]
    link: String,
}

impl TryFrom<StoredHotItem> for HotItem {
    type Error = &'static str;

    fn try_from(stored: StoredHotItem) -> Result<Self, Self::Error> {
        HotItem::new(stored.title, stored.link).ok_or("hot item title is blank")
    }
}

impl HotItem {
    /// Build an item, returning `None` when `title` is blank.
    ///
    /// Both values are stored verbatim; callers that want trimming do it first.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return None;
        }
        Some(Self {
            title,
            link: link.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}

/// The shape a raw body is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A clean JSON document served by an API.
    Json,
    /// An HTML page carrying a JSON object inside a script tag.
    HtmlEmbeddedJson,
    /// An HTML page read through markup heuristics or CSS selectors.
    Html,
    /// An RSS/XML feed.
    Xml,
}

/// A fetched response body, consumed once by an adapter.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub kind: DocumentKind,
    pub body: String,
}

impl RawDocument {
    pub fn new(kind: DocumentKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }
}

/// Everything collected in one run, keyed by source name.
///
/// Serializes flat, matching the published file layout:
/// `{"date": "2026-10-18", "bbc": [...], "toutiao": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Run date in `YYYY-MM-DD` format.
    pub date: String,
    /// Items per source, in each source's native order.
    #[serde(flatten)]
    pub sources: BTreeMap<String, Vec<HotItem>>,
}

impl DailySnapshot {
    /// Key the snapshot itself uses; no source may be named after it.
    pub const DATE_KEY: &'static str = "date";

    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            sources: BTreeMap::new(),
        }
    }

    pub fn total_items(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }
}

/// The list of snapshot dates still on disk, newest first.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateIndex {
    pub dates: Vec<String>,
}
