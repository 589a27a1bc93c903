//! Turn one item-like node into a [`HotItem`].
//!
//! Field names differ between providers (`title` vs `hotword`, `url` vs
//! `shareUrl`, ...). Each kind of source gets a [`FieldKeys`] table listing the
//! candidate names in priority order, so the order is visible in one place and
//! can be tested on its own.

use crate::models::HotItem;
use serde_json::Value;

/// Ordered candidate field names for the title and the link of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeys {
    pub title: &'static [&'static str],
    pub link: &'static [&'static str],
}

impl FieldKeys {
    /// Generic hot-list APIs.
    pub const HOT_LIST: FieldKeys = FieldKeys {
        title: &["title", "name", "hotword", "word", "keyword", "hotTitle", "hot_word"],
        link: &["url", "link", "href", "shareUrl", "share_url", "jumpUrl", "jump_url"],
    };

    /// Narrower set used to decide whether an array looks like a list of items.
    pub const PROBE: FieldKeys = FieldKeys {
        title: &["title", "name", "hotword", "word", "keyword"],
        link: &["url", "link", "href"],
    };

    /// Items embedded in a page's state object.
    pub const EMBEDDED: FieldKeys = FieldKeys {
        title: &["title"],
        link: &["href"],
    };

    /// Articles grouped under sections of an app API.
    pub const ARTICLE: FieldKeys = FieldKeys {
        title: &["title"],
        link: &["share", "url", "url1"],
    };
}

/// Text of a scalar JSON value: strings as-is, numbers and booleans in their
/// JSON form. Null, arrays and objects have no text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First non-blank scalar found under `keys`, probed in order.
///
/// Returns `None` when `node` is not an object.
pub fn first_text(node: &Value, keys: &[&str]) -> Option<String> {
    let object = node.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(scalar_text))
        .find(|text| !text.trim().is_empty())
}

/// Whether `node` carries a non-blank scalar under any of `keys`.
pub fn has_any(node: &Value, keys: &[&str]) -> bool {
    first_text(node, keys).is_some()
}

/// Normalize a JSON object into an item.
///
/// The title is mandatory. The link falls back to the same link keys inside a
/// nested `data` object, and to an empty string when nothing matches.
pub fn normalize(node: &Value, keys: &FieldKeys) -> Option<HotItem> {
    let title = first_text(node, keys.title)?;
    let link = first_text(node, keys.link)
        .or_else(|| {
            node.get("data")
                .filter(|nested| nested.is_object())
                .and_then(|nested| first_text(nested, keys.link))
        })
        .unwrap_or_default();
    HotItem::new(title, link)
}

/// Text of the first `<title>` and first `<link>` child of one RSS `<item>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RssItem {
    pub title: Option<String>,
    pub link: Option<String>,
}

/// Normalize an RSS item; both the title and the link are required.
pub fn normalize_rss_item(item: &RssItem) -> Option<HotItem> {
    let title = item.title.as_deref()?.trim();
    let link = item.link.as_deref()?.trim();
    if link.is_empty() {
        return None;
    }
    HotItem::new(title, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_priority_follows_table_order() {
        let node = json!({"keyword": "k", "name": "n", "url": "u"});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.title(), "n");
        assert_eq!(item.link(), "u");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let node = json!({"title": "  ", "hotword": "hw", "url": "", "shareUrl": "s"});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.title(), "hw");
        assert_eq!(item.link(), "s");
    }

    #[test]
    fn test_link_from_nested_data() {
        let node = json!({"title": "T", "data": {"jumpUrl": "j"}});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.link(), "j");
    }

    #[test]
    fn test_missing_link_yields_empty_link() {
        let node = json!({"word": "only a word"});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.title(), "only a word");
        assert_eq!(item.link(), "");
    }

    #[test]
    fn test_missing_title_discards() {
        assert!(normalize(&json!({"url": "u"}), &FieldKeys::HOT_LIST).is_none());
        assert!(normalize(&json!("title"), &FieldKeys::HOT_LIST).is_none());
        assert!(normalize(&json!({"title": null}), &FieldKeys::HOT_LIST).is_none());
        assert!(normalize(&json!({"title": {"text": "x"}}), &FieldKeys::HOT_LIST).is_none());
    }

    #[test]
    fn test_numeric_scalars_have_text() {
        let node = json!({"name": 42, "url": true});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.title(), "42");
        assert_eq!(item.link(), "true");
    }

    #[test]
    fn test_values_kept_verbatim() {
        let node = json!({"title": " padded ", "url": "http://x "});
        let item = normalize(&node, &FieldKeys::HOT_LIST).unwrap();
        assert_eq!(item.title(), " padded ");
        assert_eq!(item.link(), "http://x ");
    }

    #[test]
    fn test_rss_item_requires_title_and_link() {
        let full = RssItem {
            title: Some(" First ".into()),
            link: Some("http://x".into()),
        };
        let item = normalize_rss_item(&full).unwrap();
        assert_eq!(item.title(), "First");
        assert_eq!(item.link(), "http://x");

        let no_link = RssItem {
            title: Some("T".into()),
            link: None,
        };
        assert!(normalize_rss_item(&no_link).is_none());

        let blank_link = RssItem {
            title: Some("T".into()),
            link: Some("  ".into()),
        };
        assert!(normalize_rss_item(&blank_link).is_none());

        assert!(normalize_rss_item(&RssItem::default()).is_none());
    }
}
