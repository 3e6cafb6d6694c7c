//! Title and frontmatter extraction.
//!
//! Frontmatter here is the simple line-based `key: value` block between `---`
//! fences that vault documents actually carry, not full YAML.

use std::collections::BTreeMap;

/// First `# ` heading in the document, or empty when there is none.
pub fn extract_title(text: &str) -> String {
    for line in text.lines() {
        let line = line.trim();
        if let Some(title) = line.strip_prefix("# ") {
            return title.to_string();
        }
    }
    String::new()
}

/// Split a document into its frontmatter map and remaining body.
///
/// Documents without a leading `---` fence (or without a closing one) yield
/// an empty map and the full text as body.
pub fn parse_frontmatter(text: &str) -> (BTreeMap<String, String>, String) {
    let mut fields = BTreeMap::new();

    if !text.starts_with("---") {
        return (fields, text.to_string());
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let close = lines.iter().skip(1).position(|line| line.trim() == "---");
    let Some(close) = close.map(|i| i + 1) else {
        return (fields, text.to_string());
    };

    for line in &lines[1..close] {
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    let mut body = lines[close + 1..].join("\n");
    if let Some(stripped) = body.strip_prefix('\n') {
        body = stripped.to_string();
    }

    (fields, body)
}
