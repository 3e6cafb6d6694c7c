//! The vault: a concurrent index over a directory of markdown documents.
//!
//! A [`Vault`] owns the file catalog plus the derived tag/backlink index and
//! guards both with a single reader/writer lock; locks are held only for map
//! and field access, never across file I/O. Scans are synchronous and swap
//! in a complete new catalog; index builds run on a background thread and
//! commit only if the catalog generation they snapshotted is still current,
//! otherwise they loop and rebuild from a fresh snapshot.

pub mod catalog;
pub mod index;
pub mod resolver;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::parser::{self, Link};
use catalog::{scan, Catalog, CatalogEntry, EntryInfo, ScanError};
use index::{BuildReport, SkippedFile, VaultIndex};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("no such file in vault: {0}")]
    NotFound(String),

    #[error("vault root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Everything behind the lock: the catalog, the derived index, and the
/// build-scheduling flags.
struct State {
    entries: Catalog,
    index: VaultIndex,
    /// Bumped on every successful scan. A build commits only when its
    /// snapshot generation still matches.
    generation: u64,
    indexed: bool,
    indexing: bool,
    last_report: Option<BuildReport>,
}

/// A vault rooted at one directory, shared between the caller and the
/// background index builder.
pub struct Vault {
    root: PathBuf,
    state: RwLock<State>,
}

impl Vault {
    /// Open a vault: validate the root, scan it synchronously, then start an
    /// index build in the background. Returns as soon as the scan completes.
    pub fn open(path: impl AsRef<Path>) -> Result<Arc<Self>, VaultError> {
        let path = path.as_ref();
        let root = path.canonicalize().map_err(|e| VaultError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !root.is_dir() {
            return Err(VaultError::NotADirectory(root));
        }

        let entries = scan(&root)?;
        let vault = Arc::new(Self {
            root,
            state: RwLock::new(State {
                entries,
                index: VaultIndex::default(),
                generation: 1,
                indexed: false,
                indexing: false,
                last_report: None,
            }),
        });
        vault.spawn_build();
        Ok(vault)
    }

    /// Replace the catalog with a fresh scan and trigger a new index build.
    ///
    /// The walk runs off-lock against a new map; on error the previous
    /// catalog, index, and generation are left untouched.
    pub fn rescan(self: &Arc<Self>) -> Result<(), VaultError> {
        let entries = scan(&self.root)?;
        {
            let mut state = self.write();
            state.entries = entries;
            state.generation += 1;
            state.indexed = false;
        }
        self.spawn_build();
        Ok(())
    }

    /// Read a document, filling the lazy content cache on first access.
    pub fn read_file(&self, id: &str) -> Result<String, VaultError> {
        let path = {
            let state = self.read();
            let entry = state
                .entries
                .get(id)
                .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
            if let Some(content) = &entry.content {
                return Ok(content.clone());
            }
            entry.absolute_path.clone()
        };

        let content = fs::read_to_string(&path).map_err(|e| VaultError::Io {
            path: path.clone(),
            source: e,
        })?;

        let mut state = self.write();
        match state.entries.get_mut(id) {
            // first fill wins; a concurrent read or write may have landed
            Some(entry) => Ok(entry.content.get_or_insert(content).clone()),
            None => Ok(content),
        }
    }

    /// Persist new content for a document and synchronously re-extract its
    /// links and tags.
    ///
    /// The global tag/backlink maps are left as-is until the next rescan;
    /// incremental reindexing after every save is not worth it at vault
    /// scale.
    pub fn write_file(&self, id: &str, content: &str) -> Result<(), VaultError> {
        let path = {
            let state = self.read();
            state
                .entries
                .get(id)
                .ok_or_else(|| VaultError::NotFound(id.to_string()))?
                .absolute_path
                .clone()
        };

        fs::write(&path, content).map_err(|e| VaultError::Io { path, source: e })?;

        let mut state = self.write();
        if let Some(entry) = state.entries.get_mut(id) {
            entry.content = Some(content.to_string());
            entry.dirty = false;
            entry.links = parser::extract_links(content);
            entry.tags = parser::extract_unique_tags(content);
        }
        Ok(())
    }

    /// Resolve a wiki-style name to a document id against the live catalog.
    pub fn find_file(&self, name: &str) -> Option<String> {
        let state = self.read();
        resolver::resolve(state.entries.keys().map(String::as_str), name)
    }

    /// Documents whose wiki links resolve to `id`: a sorted copy, empty when
    /// the index is not ready or the document has no backlinks.
    pub fn backlinks(&self, id: &str) -> Vec<String> {
        let state = self.read();
        let mut result = state.index.backlinks.get(id).cloned().unwrap_or_default();
        result.sort();
        result
    }

    /// Documents carrying `tag`: a sorted copy, empty when unready or absent.
    pub fn files_with_tag(&self, tag: &str) -> Vec<String> {
        let state = self.read();
        let mut result = state.index.tags.get(tag).cloned().unwrap_or_default();
        result.sort();
        result
    }

    /// Every tag known to the current index, sorted.
    pub fn tag_names(&self) -> Vec<String> {
        let state = self.read();
        let mut tags: Vec<String> = state.index.tags.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Case-insensitive substring search over document base names and
    /// content. Results are sorted ids.
    pub fn search(&self, query: &str) -> Vec<String> {
        let docs: Vec<(String, String)> = {
            let state = self.read();
            state
                .entries
                .values()
                .filter(|e| !e.is_dir)
                .map(|e| (e.id.clone(), e.name.clone()))
                .collect()
        };

        let query = query.to_lowercase();
        let mut results = Vec::new();
        for (id, name) in docs {
            if name.to_lowercase().contains(&query) {
                results.push(id);
                continue;
            }
            if let Ok(content) = self.read_file(&id) {
                if content.to_lowercase().contains(&query) {
                    results.push(id);
                }
            }
        }
        results.sort();
        results
    }

    /// Create an empty document on disk and in the catalog. The tag and
    /// backlink maps only reflect it after the next rescan.
    pub fn create_file(&self, id: &str) -> Result<(), VaultError> {
        let path = self.root.join(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| VaultError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::File::create(&path).map_err(|e| VaultError::Io {
            path: path.clone(),
            source: e,
        })?;

        let name = id.rsplit('/').next().unwrap_or(id).to_string();
        let mut state = self.write();
        state.entries.insert(
            id.to_string(),
            CatalogEntry {
                absolute_path: path,
                name,
                id: id.to_string(),
                is_dir: false,
                ..CatalogEntry::default()
            },
        );
        Ok(())
    }

    /// Remove a document from disk and from the catalog.
    pub fn delete_file(&self, id: &str) -> Result<(), VaultError> {
        let path = {
            let state = self.read();
            state
                .entries
                .get(id)
                .ok_or_else(|| VaultError::NotFound(id.to_string()))?
                .absolute_path
                .clone()
        };

        fs::remove_file(&path).map_err(|e| VaultError::Io { path, source: e })?;

        let mut state = self.write();
        state.entries.remove(id);
        Ok(())
    }

    /// Whether a build has committed against the current catalog generation.
    pub fn is_indexed(&self) -> bool {
        self.read().indexed
    }

    /// Block until the index is ready or the timeout elapses. Returns the
    /// final readiness.
    pub fn wait_until_indexed(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.is_indexed() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        self.is_indexed()
    }

    /// Statistics from the most recently committed build.
    pub fn last_build_report(&self) -> Option<BuildReport> {
        self.read().last_report.clone()
    }

    /// Sorted catalog listing.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let state = self.read();
        state
            .entries
            .values()
            .map(|e| EntryInfo {
                id: e.id.clone(),
                name: e.name.clone(),
                is_dir: e.is_dir,
            })
            .collect()
    }

    /// Links extracted from one document, as of the last build or write.
    pub fn document_links(&self, id: &str) -> Vec<Link> {
        let state = self.read();
        state.entries.get(id).map(|e| e.links.clone()).unwrap_or_default()
    }

    /// Tags extracted from one document, as of the last build or write.
    pub fn document_tags(&self, id: &str) -> Vec<String> {
        let state = self.read();
        state.entries.get(id).map(|e| e.tags.clone()).unwrap_or_default()
    }

    /// The canonicalized vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a background build unless one is active or the index is already
    /// current. Checked-and-set under the write lock: at most one build
    /// thread runs at a time.
    fn spawn_build(self: &Arc<Self>) {
        {
            let mut state = self.write();
            if state.indexing || state.indexed {
                return;
            }
            state.indexing = true;
        }
        let vault = Arc::clone(self);
        thread::spawn(move || vault.build_index());
    }

    /// Build the derived index. Runs until a build commits against the
    /// current generation; a rescan landing mid-build makes the loop discard
    /// the stale result and start over from a fresh snapshot.
    fn build_index(&self) {
        loop {
            let started = Instant::now();

            // Snapshot under a brief read lock so file I/O below never
            // blocks foreground calls.
            let (generation, ids, doc_ids) = {
                let state = self.read();
                let ids: Vec<String> = state.entries.keys().cloned().collect();
                let doc_ids: Vec<String> = state
                    .entries
                    .values()
                    .filter(|e| !e.is_dir)
                    .map(|e| e.id.clone())
                    .collect();
                (state.generation, ids, doc_ids)
            };

            let mut tags: HashMap<String, Vec<String>> = HashMap::new();
            let mut extracted: Vec<(String, Vec<Link>)> = Vec::with_capacity(doc_ids.len());
            let mut skipped = Vec::new();

            // Pass 1: extract links and tags from every document. Unreadable
            // files are skipped, not fatal.
            for id in &doc_ids {
                let content = match self.read_file(id) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!("skipping {id} during index build: {e}");
                        skipped.push(SkippedFile {
                            id: id.clone(),
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                let links = parser::extract_links(&content);
                let file_tags = parser::extract_unique_tags(&content);

                {
                    let mut state = self.write();
                    if let Some(entry) = state.entries.get_mut(id) {
                        entry.links = links.clone();
                        entry.tags = file_tags.clone();
                    }
                }

                for tag in &file_tags {
                    tags.entry(tag.clone()).or_default().push(id.clone());
                }
                extracted.push((id.clone(), links));
            }

            // Pass 2: resolve wiki links against the snapshot's id set. Runs
            // only after pass 1 so every target's presence is known.
            let mut backlinks: HashMap<String, Vec<String>> = HashMap::new();
            for (id, links) in &extracted {
                for link in links.iter().filter(|l| l.wiki_style) {
                    if let Some(target) =
                        resolver::resolve(ids.iter().map(String::as_str), &link.target)
                    {
                        backlinks.entry(target).or_default().push(id.clone());
                    }
                }
            }

            let report = BuildReport {
                generation,
                documents_indexed: extracted.len(),
                skipped,
                duration_ms: started.elapsed().as_millis() as u64,
            };

            let mut state = self.write();
            if state.generation == generation {
                debug!(
                    generation,
                    documents = report.documents_indexed,
                    skipped = report.skipped.len(),
                    duration_ms = report.duration_ms,
                    "index build committed"
                );
                state.index = VaultIndex { tags, backlinks };
                state.indexed = true;
                state.indexing = false;
                state.last_report = Some(report);
                return;
            }
            debug!(
                stale = generation,
                current = state.generation,
                "discarding stale index build"
            );
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
