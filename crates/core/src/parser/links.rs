//! Link extraction from markdown text.

use std::sync::LazyLock;

use regex::Regex;

// Matches [[target]] or [[target|alias]]. Section anchors ([[target#section]])
// stay inside the target; the resolver strips them.
static WIKI_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());

// Matches [label](target).
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

// Matches ![[target]] or ![[target|alt]] embeds.
static EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());

/// A link occurrence in a document.
///
/// Offsets are byte positions into the text the link was extracted from; they
/// go stale the moment that text is edited without re-extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Raw target text as written inside the link markup.
    pub target: String,
    /// Text displayed for the link (alias for wiki links, label otherwise).
    pub display_text: String,
    /// Offset of the first byte of the match.
    pub start: usize,
    /// Offset one past the last byte of the match.
    pub end: usize,
    /// Whether this is a `[[...]]` wiki link.
    pub wiki_style: bool,
}

/// An embedded note reference (`![[note]]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedLink {
    pub target: String,
    pub alt_text: String,
    pub start: usize,
    pub end: usize,
}

/// Extract all `[[target]]` / `[[target|alias]]` links, in document order.
pub fn extract_wiki_links(text: &str) -> Vec<Link> {
    WIKI_LINK_RE
        .captures_iter(text)
        .map(|cap| {
            let whole = cap.get(0).expect("match has a full capture");
            let target = cap.get(1).map_or("", |m| m.as_str());
            let display = cap.get(2).map_or(target, |m| m.as_str());
            Link {
                target: target.to_string(),
                display_text: display.to_string(),
                start: whole.start(),
                end: whole.end(),
                wiki_style: true,
            }
        })
        .collect()
}

/// Extract all `[label](target)` links, in document order.
pub fn extract_markdown_links(text: &str) -> Vec<Link> {
    MARKDOWN_LINK_RE
        .captures_iter(text)
        .map(|cap| {
            let whole = cap.get(0).expect("match has a full capture");
            let display = cap.get(1).map_or("", |m| m.as_str());
            let target = cap.get(2).map_or("", |m| m.as_str());
            Link {
                target: target.to_string(),
                display_text: display.to_string(),
                start: whole.start(),
                end: whole.end(),
                wiki_style: false,
            }
        })
        .collect()
}

/// Extract every link in the document: all wiki links in document order,
/// followed by all markdown links in document order.
///
/// The two kinds are not merged by position; downstream consumers rely on
/// this grouping.
pub fn extract_links(text: &str) -> Vec<Link> {
    let mut links = extract_wiki_links(text);
    links.extend(extract_markdown_links(text));
    links
}

/// Extract all `![[note]]` style embeds.
pub fn extract_embeds(text: &str) -> Vec<EmbedLink> {
    EMBED_RE
        .captures_iter(text)
        .map(|cap| {
            let whole = cap.get(0).expect("match has a full capture");
            let target = cap.get(1).map_or("", |m| m.as_str());
            let alt = cap.get(2).map_or("", |m| m.as_str());
            EmbedLink {
                target: target.to_string(),
                alt_text: alt.to_string(),
                start: whole.start(),
                end: whole.end(),
            }
        })
        .collect()
}

/// Find the link spanning the given byte position, if any.
pub fn link_at(text: &str, pos: usize) -> Option<Link> {
    extract_links(text)
        .into_iter()
        .find(|link| pos >= link.start && pos < link.end)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn wiki_link_without_alias() {
        let links = extract_wiki_links("see [[project-x]] for details");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "project-x");
        assert_eq!(links[0].display_text, "project-x");
        assert!(links[0].wiki_style);
        assert_eq!(&"see [[project-x]] for details"[links[0].start..links[0].end], "[[project-x]]");
    }

    #[test]
    fn wiki_link_with_alias() {
        let links = extract_wiki_links("[[notes/project|the project]]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "notes/project");
        assert_eq!(links[0].display_text, "the project");
    }

    #[test]
    fn markdown_link() {
        let links = extract_markdown_links("read [the docs](guide.md) first");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "guide.md");
        assert_eq!(links[0].display_text, "the docs");
        assert!(!links[0].wiki_style);
    }

    #[test]
    fn all_links_groups_wiki_before_markdown() {
        let text = "[md](a.md) then [[b]] then [md2](c.md) then [[d]]";
        let links = extract_links(text);
        let kinds: Vec<bool> = links.iter().map(|l| l.wiki_style).collect();
        assert_eq!(kinds, vec![true, true, false, false]);
        assert_eq!(links[0].target, "b");
        assert_eq!(links[1].target, "d");
        assert_eq!(links[2].target, "a.md");
        assert_eq!(links[3].target, "c.md");
    }

    #[rstest]
    #[case("no links here", 0)]
    #[case("[[a]] [[b]] [[c]]", 3)]
    #[case("[[a|x]] and [y](b.md)", 2)]
    fn link_counts(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(extract_links(text).len(), expected);
    }

    #[test]
    fn embeds() {
        let embeds = extract_embeds("before ![[diagram]] after ![[img|alt]]");
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].target, "diagram");
        assert_eq!(embeds[1].alt_text, "alt");
    }

    #[test]
    fn link_at_position() {
        let text = "see [[target]] here";
        let hit = link_at(text, 6).expect("inside the link");
        assert_eq!(hit.target, "target");
        assert!(link_at(text, 0).is_none());
        assert!(link_at(text, text.len() - 1).is_none());
    }

    #[test]
    fn section_anchor_stays_in_target() {
        let links = extract_wiki_links("[[note#section]]");
        assert_eq!(links[0].target, "note#section");
    }
}
