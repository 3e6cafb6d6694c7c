//! Tag extraction from markdown text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

// A tag is #name at start of text or after whitespace. Without the boundary
// check, anchors like "note#section" would count as tags.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([a-zA-Z0-9_\-/]+)").unwrap());

/// A tag occurrence in a document. Offsets cover the `#` and the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Extract every tag occurrence, in document order.
pub fn extract_tags(text: &str) -> Vec<Tag> {
    TAG_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let name = cap.get(1)?;
            Some(Tag {
                name: name.as_str().to_string(),
                // the '#' sits immediately before the captured name
                start: name.start() - 1,
                end: name.end(),
            })
        })
        .collect()
}

/// Extract the set of tags in a document: deduplicated, sorted.
pub fn extract_unique_tags(text: &str) -> Vec<String> {
    extract_tags(text)
        .into_iter()
        .map(|tag| tag.name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Find the tag spanning the given byte position, if any.
pub fn tag_at(text: &str, pos: usize) -> Option<Tag> {
    extract_tags(text)
        .into_iter()
        .find(|tag| pos >= tag.start && pos < tag.end)
}
