//! Wiki link resolution against catalogued ids.
//!
//! Two-pass matching: base names first, full ids as a fallback. Short links
//! like `[[ProjectX]]` hit a file anywhere in the tree by base name, while
//! `[[folder/ProjectX]]` disambiguates by full path.

/// Normalize a raw link target: trim, drop any `#section` anchor, append the
/// `.md` extension when missing.
pub fn normalize_target(raw: &str) -> String {
    let mut target = raw.trim();
    if let Some(anchor) = target.find('#') {
        target = &target[..anchor];
    }
    if target.ends_with(".md") {
        target.to_string()
    } else {
        format!("{target}.md")
    }
}

/// Resolve a raw link target against an ordered sequence of catalog ids.
///
/// Pass 1 compares base names case-insensitively; pass 2 (only on a miss)
/// compares full ids. First match wins: callers iterate ids in sorted order,
/// so an ambiguous base name deterministically resolves to the
/// lexicographically smallest id.
pub fn resolve<'a, I>(ids: I, raw_target: &str) -> Option<String>
where
    I: Iterator<Item = &'a str> + Clone,
{
    let target = normalize_target(raw_target).to_lowercase();

    for id in ids.clone() {
        let base = id.rsplit('/').next().unwrap_or(id);
        if base.to_lowercase() == target {
            return Some(id.to_string());
        }
    }

    for id in ids {
        if id.to_lowercase() == target {
            return Some(id.to_string());
        }
    }

    None
}
