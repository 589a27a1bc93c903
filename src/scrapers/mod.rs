//! Feed adapters: one per family of source.
//!
//! Each adapter is a pure function from a response body to at most
//! [`MAX_ITEMS`] [`HotItem`]s, built from the pieces in [`crate::extract`].
//!
//! # Supported Families
//!
//! | Family | Module | Input | Notes |
//! |--------|--------|-------|-------|
//! | JSON API | [`json_api`] | JSON | envelope located heuristically |
//! | Embedded JSON | [`embedded_json`] | HTML | state object cut out around a marker |
//! | RSS | [`rss`] | XML | `<item>` elements in document order |
//! | Anchors | [`anchors`] | HTML | `<a href>` pairs after a section marker, de-duplicated |
//! | CSS selector | [`selector`] | HTML | title and link selectors zipped by position |
//! | Grouped JSON | [`grouped`] | JSON | articles nested under section groups |
//!
//! # Failure Semantics
//!
//! Adapters return `Result` so that tests can see why a body was rejected, but
//! callers go through [`extract`] or [`scrape`], which turn every failure into
//! an empty list and a warning. A broken source never affects its siblings.

pub mod anchors;
pub mod embedded_json;
pub mod grouped;
pub mod json_api;
pub mod rss;
pub mod selector;

use crate::config::Source;
use crate::fetch::{Fetch, FetchError, fetch_first};
use crate::models::{DocumentKind, HotItem, RawDocument};
use crate::utils::truncate_for_log;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Upper bound on the number of items any adapter returns.
pub const MAX_ITEMS: usize = 10;

/// Why an adapter could not read a body.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid CSS selector: {0}")]
    Selector(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid origin URL: {0}")]
    Origin(#[from] url::ParseError),
    #[error("adapter expects a {expected:?} document, got {actual:?}")]
    WrongDocument {
        expected: DocumentKind,
        actual: DocumentKind,
    },
}

/// Which adapter reads a source, with its per-source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adapter {
    JsonApi,
    EmbeddedJson(embedded_json::Settings),
    Rss,
    Anchors(anchors::Settings),
    Selector(selector::Settings),
    Grouped(grouped::Settings),
}

impl Adapter {
    /// The document shape this adapter reads.
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            Adapter::JsonApi | Adapter::Grouped(_) => DocumentKind::Json,
            Adapter::EmbeddedJson(_) => DocumentKind::HtmlEmbeddedJson,
            Adapter::Rss => DocumentKind::Xml,
            Adapter::Anchors(_) | Adapter::Selector(_) => DocumentKind::Html,
        }
    }

    /// Run the adapter on a document, surfacing errors.
    pub fn parse(&self, document: &RawDocument, page_url: &str) -> Result<Vec<HotItem>, ScrapeError> {
        let expected = self.document_kind();
        if document.kind != expected {
            return Err(ScrapeError::WrongDocument {
                expected,
                actual: document.kind,
            });
        }

        let body = document.body.as_str();
        match self {
            Adapter::JsonApi => json_api::parse(body),
            Adapter::EmbeddedJson(settings) => embedded_json::parse(body, settings),
            Adapter::Rss => rss::parse(body),
            Adapter::Anchors(settings) => anchors::parse(body, settings),
            Adapter::Selector(settings) => selector::parse(body, page_url, settings),
            Adapter::Grouped(settings) => grouped::parse(body, settings),
        }
    }
}

/// Run an adapter on a document; any failure becomes an empty list.
pub fn extract(adapter: &Adapter, document: &RawDocument, page_url: &str) -> Vec<HotItem> {
    match adapter.parse(document, page_url) {
        Ok(items) => items,
        Err(e) => {
            warn!(
                %page_url,
                kind = ?document.kind,
                error = %e,
                body = %truncate_for_log(&document.body, 200),
                "Adapter failed; no items for this source"
            );
            Vec::new()
        }
    }
}

/// Fetch a source and extract its items.
///
/// Candidate URLs are tried in order. Transport failures yield an empty list,
/// exactly like parse failures.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn scrape<F: Fetch>(fetcher: &F, source: &Source) -> Vec<HotItem> {
    match try_scrape(fetcher, source).await {
        Ok(items) => {
            info!(count = items.len(), "Extracted hot items");
            items
        }
        Err(e) => {
            warn!(error = %e, "Source failed; no items for this source");
            Vec::new()
        }
    }
}

async fn try_scrape<F: Fetch>(fetcher: &F, source: &Source) -> Result<Vec<HotItem>, ScrapeError> {
    let (url, body) = fetch_first(fetcher, &source.urls).await?;
    debug!(%url, bytes = body.len(), "Fetched source body");
    let document = RawDocument::new(source.adapter.document_kind(), body);
    source.adapter.parse(&document, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::StubFetch;

    fn source(name: &str, urls: &[&str], adapter: Adapter) -> Source {
        Source {
            name: name.to_string(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
            adapter,
        }
    }

    #[test]
    fn test_extract_swallows_parse_errors() {
        let document = RawDocument::new(DocumentKind::Json, "{not json");
        assert!(extract(&Adapter::JsonApi, &document, "http://x").is_empty());
    }

    #[test]
    fn test_wrong_document_kind_is_rejected() {
        let document = RawDocument::new(DocumentKind::Xml, r#"{"data":[{"title":"A"}]}"#);
        let err = Adapter::JsonApi.parse(&document, "http://x").unwrap_err();
        assert!(matches!(err, ScrapeError::WrongDocument { .. }));
        assert!(extract(&Adapter::JsonApi, &document, "http://x").is_empty());
    }

    #[tokio::test]
    async fn test_scrape_uses_first_answering_candidate() {
        let stub = StubFetch::default().respond(
            "http://api/2",
            Ok(r#"{"data":[{"title":"A","url":"http://x"}]}"#.into()),
        );
        let src = source("api", &["http://api/1", "http://api/2"], Adapter::JsonApi);

        let items = scrape(&stub, &src).await;
        assert_eq!(items, vec![HotItem::new("A", "http://x").unwrap()]);
    }

    #[tokio::test]
    async fn test_scrape_transport_failure_is_empty() {
        let stub = StubFetch::default();
        let src = source("down", &["http://down"], Adapter::Rss);
        assert!(scrape(&stub, &src).await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_source_does_not_affect_sibling() {
        let stub = StubFetch::default()
            .respond("http://bad", Ok("<html>maintenance</html>".into()))
            .respond("http://good", Ok(r#"{"list":[{"word":"w"}]}"#.into()));
        let bad = source("bad", &["http://bad"], Adapter::JsonApi);
        let good = source("good", &["http://good"], Adapter::JsonApi);

        assert!(scrape(&stub, &bad).await.is_empty());
        let items = scrape(&stub, &good).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "w");
        assert_eq!(items[0].link(), "");
    }

    #[test]
    fn test_document_kinds() {
        assert_eq!(Adapter::JsonApi.document_kind(), DocumentKind::Json);
        assert_eq!(Adapter::Rss.document_kind(), DocumentKind::Xml);
        assert_eq!(
            Adapter::EmbeddedJson(embedded_json::Settings::default()).document_kind(),
            DocumentKind::HtmlEmbeddedJson
        );
    }
}
