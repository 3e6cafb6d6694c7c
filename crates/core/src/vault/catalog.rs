//! The file catalog: every directory and markdown document under the root.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::parser::Link;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),
}

/// One filesystem path under the vault root.
///
/// `content` is a lazy cache: unset until the first read, overwritten on
/// write, never evicted within a catalog generation. `links` and `tags` are
/// populated by the index builder (and refreshed synchronously on write).
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    /// Resolved absolute filesystem location.
    pub absolute_path: PathBuf,
    /// Base name of the entry.
    pub name: String,
    /// Slash-normalized path relative to the vault root; `""` is the root.
    pub id: String,
    pub is_dir: bool,
    pub content: Option<String>,
    pub links: Vec<Link>,
    pub tags: Vec<String>,
    /// Whether in-memory content differs from what was last persisted.
    pub dirty: bool,
}

/// Catalog keyed by relative id. A `BTreeMap` keeps iteration deterministic,
/// which in turn makes ambiguous link resolution deterministic.
pub type Catalog = BTreeMap<String, CatalogEntry>;

/// Lightweight listing view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub id: String,
    pub name: String,
    pub is_dir: bool,
}

/// Walk the tree under `root` and build a fresh catalog.
///
/// Hidden entries (name starting with `.`) are skipped, directories entirely.
/// Directories are catalogued; files only when they carry a case-insensitive
/// `md` extension. Content is not read. Any walk error aborts the scan, so a
/// partial catalog is never returned.
pub fn scan(root: &Path) -> Result<Catalog, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.display().to_string()));
    }

    let mut entries = Catalog::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = entry.map_err(|e| ScanError::Walk(root.display().to_string(), e))?;
        let is_dir = entry.file_type().is_dir();
        if !is_dir && !is_markdown_file(entry.path()) {
            continue;
        }

        let id = relative_id(root, entry.path());
        entries.insert(
            id.clone(),
            CatalogEntry {
                absolute_path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                id,
                is_dir,
                ..CatalogEntry::default()
            },
        );
    }

    debug!(root = %root.display(), entries = entries.len(), "scanned vault");
    Ok(entries)
}

/// Slash-normalized path of `path` relative to `root`; `""` for the root.
pub fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
