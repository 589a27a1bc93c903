//! Pages that ship their content as a JSON state object inside a script tag.
//!
//! BBC's Chinese front page is the model case: the server renders a large
//! object containing `"status":200` once, and every section of the page keeps
//! its stories in an `items` array somewhere below it.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::{FieldKeys, extract_balanced_object, normalize};
use crate::models::HotItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Per-source settings for the embedded-JSON adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Literal text expected exactly once inside the state object.
    pub marker: String,
    /// Key under which every section keeps its item list.
    pub items_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: r#""status":200"#.to_string(),
            items_key: "items".to_string(),
        }
    }
}

/// Parse a page body into at most [`MAX_ITEMS`] items.
///
/// A page without the marker yields no items: the source changed shape or
/// served a block page.
pub fn parse(html: &str, settings: &Settings) -> Result<Vec<HotItem>, ScrapeError> {
    let Some(object) = extract_balanced_object(html, &settings.marker) else {
        info!(marker = %settings.marker, "Marker not found in page");
        return Ok(Vec::new());
    };
    debug!(bytes = object.len(), "Cut state object out of page");

    let root: Value = serde_json::from_str(object)?;
    let lists = collect_keyed(&root, &settings.items_key);
    debug!(lists = lists.len(), key = %settings.items_key, "Collected item lists");

    Ok(lists
        .into_iter()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|node| normalize(node, &FieldKeys::EMBEDDED))
        .take(MAX_ITEMS)
        .collect())
}

/// Every value stored under `key`, anywhere in the tree, in pre-order.
///
/// A node's own `key` comes before anything found among its children, and the
/// value itself is searched too.
fn collect_keyed<'a>(root: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                if let Some(value) = map.get(key) {
                    found.push(value);
                }
                stack.extend(map.values().rev());
            }
            Value::Array(elements) => stack.extend(elements.iter().rev()),
            _ => {}
        }
    }

    found
}
