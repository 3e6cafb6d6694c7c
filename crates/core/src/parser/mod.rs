//! Markdown text extraction: links, tags, titles, frontmatter.
//!
//! Everything in this module is a pure function over document text. No I/O,
//! no shared state, safe to call from any thread.

pub mod frontmatter;
pub mod links;
pub mod tags;

pub use frontmatter::{extract_title, parse_frontmatter};
pub use links::{
    extract_embeds, extract_links, extract_markdown_links, extract_wiki_links, link_at,
    EmbedLink, Link,
};
pub use tags::{extract_tags, extract_unique_tags, tag_at, Tag};
