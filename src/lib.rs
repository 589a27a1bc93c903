//! # hot_feed
//!
//! Pulls short "hot items" lists (title plus link) out of sources that never
//! agreed on a format: JSON APIs with drifting envelopes, pages that hide their
//! data in a script tag, pages with no stable markup at all, and RSS feeds.
//!
//! ## Architecture
//!
//! 1. **Fetching** ([`fetch`]): candidate URLs tried in order, with retry and
//!    backoff
//! 2. **Extraction** ([`extract`]): find the item list inside whatever came back
//!    and normalize each entry into a [`models::HotItem`]
//! 3. **Adapters** ([`scrapers`]): one per family of source, each capped at
//!    [`scrapers::MAX_ITEMS`]; a failing source yields an empty list
//! 4. **Output** ([`outputs`]): a dated snapshot per day, retention, and a date
//!    index
//!
//! ## Example
//!
//! ```
//! use hot_feed::models::{DocumentKind, RawDocument};
//! use hot_feed::scrapers::{Adapter, extract};
//!
//! let body = r#"{"code":0,"data":{"list":[{"word":"Rust 2026","url":"https://example.com/1"}]}}"#;
//! let items = extract(&Adapter::JsonApi, &RawDocument::new(DocumentKind::Json, body), "https://example.com");
//! assert_eq!(items[0].title(), "Rust 2026");
//! ```

pub mod config;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
