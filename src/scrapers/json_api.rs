//! Generic hot-list JSON APIs.
//!
//! Aggregator APIs (Toutiao, Baidu, Weibo mirrors, ...) all serve "a list of
//! things with a title and maybe a URL" but agree on nothing else. We locate the
//! list with [`find_best_items_array`] and read each entry with the
//! [`FieldKeys::HOT_LIST`] table.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::{FieldKeys, find_best_items_array, normalize};
use crate::models::HotItem;
use serde_json::Value;
use tracing::debug;

/// Parse a JSON API body into at most [`MAX_ITEMS`] items.
///
/// Only the first [`MAX_ITEMS`] elements of the located array are considered;
/// elements without a usable title are skipped, not replaced.
pub fn parse(body: &str) -> Result<Vec<HotItem>, ScrapeError> {
    let root: Value = serde_json::from_str(body)?;

    let Some(candidate) = find_best_items_array(&root) else {
        debug!("No items array in JSON body");
        return Ok(Vec::new());
    };

    let items: Vec<HotItem> = candidate
        .items
        .iter()
        .take(MAX_ITEMS)
        .filter_map(|node| normalize(node, &FieldKeys::HOT_LIST))
        .collect();
    debug!(path = %candidate.path, score = candidate.score, count = items.len(), "Normalized JSON items");
    Ok(items)
}
