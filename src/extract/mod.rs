//! The tolerant extraction engine.
//!
//! Nothing in here knows about a particular site. The pieces are combined by
//! the adapters in [`crate::scrapers`]:
//!
//! | Module | Job |
//! |--------|-----|
//! | [`window`] | cut a balanced `{...}` object out of a page around a marker |
//! | [`locate`] | pick the array in a JSON tree that looks like a list of items |
//! | [`normalize`] | read a title and a link out of one item node |
//! | [`html`] | strip markup, decode entities and resolve hrefs |
//!
//! All functions are pure over borrowed input.

pub mod html;
pub mod locate;
pub mod normalize;
pub mod window;

pub use locate::{CandidateArray, find_best_items_array};
pub use normalize::{FieldKeys, normalize, normalize_rss_item};
pub use window::extract_balanced_object;
