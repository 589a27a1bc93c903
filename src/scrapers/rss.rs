//! RSS feeds.
//!
//! The feed is walked as a stream of XML events. Every `<item>` element is
//! picked up in document order, wherever it sits (`<channel>` for RSS 2.0,
//! next to it for RSS 1.0). Only the item's own unprefixed `<title>` and
//! `<link>` children count, so namespaced extensions such as `<media:title>`
//! or `<atom:link>` are ignored.
//!
//! Feeds are untrusted input. The `<!DOCTYPE>` is skipped and only the five
//! predefined entities and character references are expanded; any other
//! entity reference is dropped, so a feed cannot pull local files or remote
//! URLs into its text.

use super::{MAX_ITEMS, ScrapeError};
use crate::extract::normalize::{RssItem, normalize_rss_item};
use crate::models::HotItem;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            _ => None,
        }
    }
}

/// Parse a feed into its first [`MAX_ITEMS`] items that have a title and a link.
pub fn parse(xml: &str) -> Result<Vec<HotItem>, ScrapeError> {
    Ok(read_items(xml)?)
}

fn read_items(xml: &str) -> Result<Vec<HotItem>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut seen = 0usize;

    // Open item, nesting depth below it, and the child whose text is being read.
    let mut current: Option<RssItem> = None;
    let mut depth = 0usize;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match current.as_mut() {
                Some(item) => {
                    depth += 1;
                    if depth == 1 {
                        field = Field::from_name(e.name().as_ref()).filter(|f| !item.has(*f));
                        text.clear();
                    }
                }
                None if e.name().as_ref() == b"item" => {
                    current = Some(RssItem::default());
                    depth = 0;
                }
                None => {}
            },
            Event::Empty(e) => {
                if let Some(item) = current.as_mut() {
                    if depth == 0 {
                        if let Some(f) = Field::from_name(e.name().as_ref()) {
                            item.set_first(f, String::new());
                        }
                    }
                }
            }
            Event::End(_) => {
                let Some(item) = current.as_mut() else {
                    continue;
                };
                if depth > 0 {
                    if depth == 1 {
                        if let Some(f) = field.take() {
                            item.set_first(f, std::mem::take(&mut text));
                        }
                    }
                    depth -= 1;
                    continue;
                }
                seen += 1;
                if let Some(hot) = current.take().as_ref().and_then(normalize_rss_item) {
                    items.push(hot);
                    if items.len() == MAX_ITEMS {
                        break;
                    }
                }
            }
            Event::Text(t) if field.is_some() => text.push_str(&t.xml10_content()?),
            Event::CData(c) if field.is_some() => text.push_str(&c.xml10_content()?),
            Event::GeneralRef(r) if field.is_some() => push_reference(&mut text, &r)?,
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(seen, kept = items.len(), "Read feed items");
    Ok(items)
}

fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> Result<(), quick_xml::Error> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = reference.decode()?;
    match resolve_predefined_entity(&name) {
        Some(value) => text.push_str(value),
        None => debug!(entity = %name, "Dropping undeclared entity reference"),
    }
    Ok(())
}

impl RssItem {
    fn has(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title.is_some(),
            Field::Link => self.link.is_some(),
        }
    }

    fn set_first(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
        };
        slot.get_or_insert(value);
    }
}
