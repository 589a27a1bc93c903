//! Locate a JSON object embedded in a larger text (usually an HTML page).
//!
//! Pages that render from a server-side state blob carry it as a plain object
//! literal somewhere inside a `<script>` tag. Rather than parse the HTML we pick
//! a marker that occurs once inside the object and walk outwards to the
//! enclosing braces.

use tracing::debug;

/// Return the brace-delimited object that encloses the first `marker`.
///
/// From the marker we scan backwards for the nearest `{` that is not closed
/// before the marker, then forwards counting brace depth until it returns to
/// zero. The returned slice starts with that `{` and ends with the matching
/// `}`.
///
/// Returns `None` when the marker is absent or no unmatched `{` precedes it.
/// When the text ends before the object closes, everything from the opening
/// brace to the end of the text is returned.
///
/// # Known limitation
///
/// Braces inside JSON string literals are counted like any other brace, so a
/// value such as `"title": "a } b"` can terminate the object early. The feeds
/// this is used on do not hit that in practice; callers parse the result and
/// treat a parse failure as "no items".
pub fn extract_balanced_object<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let marker_at = text.find(marker)?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut start = None;
    for i in (0..marker_at).rev() {
        match bytes[i] {
            b'}' => depth += 1,
            b'{' if depth == 0 => {
                start = Some(i);
                break;
            }
            b'{' => depth -= 1,
            _ => {}
        }
    }
    let start = start?;

    let mut depth = 0usize;
    for (offset, byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    debug!(start, len = text.len(), "Object never closed; returning tail of text");
    Some(&text[start..])
}
