//! Derived index: tag and backlink maps, rebuilt wholesale by each build.

use std::collections::HashMap;

/// The derived maps over one catalog snapshot.
///
/// Both maps are replaced as a unit when a build commits; readers therefore
/// see either the previous index or the new one, never a mix.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    /// Tag name to ids of documents carrying it (insertion order; callers
    /// sort on read).
    pub tags: HashMap<String, Vec<String>>,
    /// Document id to ids of documents whose wiki links resolve to it.
    pub backlinks: HashMap<String, Vec<String>>,
}

/// A document the builder could not read and therefore left unindexed.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub id: String,
    pub reason: String,
}

/// Statistics from one index build.
///
/// The skip list records documents the builder could not read, so a caller
/// can tell why a document is absent without the build itself failing.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Catalog generation the build ran against.
    pub generation: u64,
    /// Documents whose links and tags made it into the index.
    pub documents_indexed: usize,
    pub skipped: Vec<SkippedFile>,
    pub duration_ms: u64,
}
