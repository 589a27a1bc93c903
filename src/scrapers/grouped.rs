//! App APIs that group articles into sections.
//!
//! Dongqiudi's tab endpoint answers `{"contents": [{"articles": [...]}, ...]}`,
//! one group per day. Articles carry the readable page under `share`, falling
//! back to `url` and `url1`.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::{FieldKeys, normalize};
use crate::models::HotItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Per-source settings for the grouped-JSON adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Top-level key holding the array of groups.
    pub groups_key: String,
    /// Key holding each group's article array.
    pub items_key: String,
    /// When set, links must contain this domain.
    pub domain: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            groups_key: "contents".to_string(),
            items_key: "articles".to_string(),
            domain: None,
        }
    }
}

/// Parse a grouped body into at most [`MAX_ITEMS`] items.
///
/// Titles and links are trimmed and both are required.
pub fn parse(body: &str, settings: &Settings) -> Result<Vec<HotItem>, ScrapeError> {
    let root: Value = serde_json::from_str(body)?;
    let Some(groups) = root.get(&settings.groups_key).and_then(Value::as_array) else {
        debug!(key = %settings.groups_key, "No groups array in body");
        return Ok(Vec::new());
    };

    let domain = settings.domain.as_deref().map(str::to_lowercase);
    Ok(groups
        .iter()
        .filter_map(|group| group.get(&settings.items_key).and_then(Value::as_array))
        .flatten()
        .filter_map(|article| {
            let item = normalize(article, &FieldKeys::ARTICLE)?;
            let link = item.link().trim();
            if link.is_empty() {
                return None;
            }
            if let Some(domain) = &domain {
                if !link.to_lowercase().contains(domain.as_str()) {
                    return None;
                }
            }
            HotItem::new(item.title().trim(), link)
        })
        .take(MAX_ITEMS)
        .collect())
}
