//! Find the array that most plausibly holds the "hot items" of a JSON document.
//!
//! Providers wrap their lists in different envelopes: `{"data": [...]}`,
//! `{"data": {"list": [...]}}`, `{"result": [...]}`, or something nobody would
//! guess. [`find_best_items_array`] tries the common envelopes first and only
//! falls back to scanning the whole tree when none of them fits.

use crate::extract::normalize::{FieldKeys, has_any};
use serde_json::Value;
use tracing::debug;

/// Keys probed under a top-level `data` object, in order.
const NESTED_DATA_KEYS: &[&str] = &["list", "data", "items", "result"];

/// Top-level keys probed after the `data` envelope, in order.
const TOP_LEVEL_KEYS: &[&str] = &[
    "list", "result", "items", "news", "hot", "hots", "dataList", "data_list",
];

/// How many leading elements are sampled by [`looks_like_items`].
const SAMPLE_SIZE: usize = 3;

/// A borrowed view of an array inside a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateArray<'a> {
    /// The array's elements.
    pub items: &'a [Value],
    /// Goodness score; the element count.
    pub score: usize,
    /// JSON pointer to the array, usable with [`Value::pointer`].
    pub path: String,
}

impl<'a> CandidateArray<'a> {
    fn new(items: &'a [Value], path: String) -> Self {
        Self {
            items,
            score: items.len(),
            path,
        }
    }
}

/// Whether an array looks like a list of items.
///
/// The array must be non-empty and at least one of its first three elements
/// must be an object carrying a title-like or link-like value, either directly
/// or inside a nested `data` object.
pub fn looks_like_items(items: &[Value]) -> bool {
    items.iter().take(SAMPLE_SIZE).any(|element| {
        element.is_object()
            && (carries_probe_field(element)
                || element
                    .get("data")
                    .is_some_and(|nested| nested.is_object() && carries_probe_field(nested)))
    })
}

fn carries_probe_field(node: &Value) -> bool {
    has_any(node, FieldKeys::PROBE.title) || has_any(node, FieldKeys::PROBE.link)
}

/// Locate the best items array in `root`, or `None` when nothing qualifies.
///
/// Priority, first match wins:
/// 1. `root.data` as an array
/// 2. `root.data.{list,data,items,result}`
/// 3. `root.{list,result,items,news,hot,hots,dataList,data_list}`
/// 4. the largest qualifying array anywhere in the tree, ties going to the one
///    met first in a depth-first walk
pub fn find_best_items_array(root: &Value) -> Option<CandidateArray<'_>> {
    if let Some(found) = pick_items(root, "data", "") {
        debug!(path = %found.path, "Items array found under root data");
        return Some(found);
    }

    if let Some(data) = root.get("data").filter(|d| d.is_object()) {
        if let Some(found) = NESTED_DATA_KEYS
            .iter()
            .find_map(|key| pick_items(data, key, "/data"))
        {
            debug!(path = %found.path, "Items array found under nested data");
            return Some(found);
        }
    }

    if let Some(found) = TOP_LEVEL_KEYS
        .iter()
        .find_map(|key| pick_items(root, key, ""))
    {
        debug!(path = %found.path, "Items array found under a common key");
        return Some(found);
    }

    let best = scan_for_best_array(root);
    match &best {
        Some(found) => debug!(path = %found.path, score = found.score, "Items array found by tree scan"),
        None => debug!("No items array anywhere in document"),
    }
    best
}

fn pick_items<'a>(node: &'a Value, key: &str, parent: &str) -> Option<CandidateArray<'a>> {
    let items = node.get(key)?.as_array()?;
    looks_like_items(items).then(|| CandidateArray::new(items, format!("{parent}/{}", escape_pointer(key))))
}

/// Depth-first walk over the whole tree keeping the largest qualifying array.
fn scan_for_best_array(root: &Value) -> Option<CandidateArray<'_>> {
    let mut best: Option<CandidateArray<'_>> = None;
    // Children are pushed in reverse so they pop in document order.
    let mut stack: Vec<(&Value, String)> = vec![(root, String::new())];

    while let Some((node, path)) = stack.pop() {
        match node {
            Value::Array(items) => {
                if looks_like_items(items) && best.as_ref().is_none_or(|b| items.len() > b.score) {
                    best = Some(CandidateArray::new(items, path.clone()));
                }
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push((child, format!("{path}/{i}")));
                }
            }
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    stack.push((child, format!("{path}/{}", escape_pointer(key))));
                }
            }
            _ => {}
        }
    }

    best
}

fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
