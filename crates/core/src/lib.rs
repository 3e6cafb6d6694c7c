#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

//! notegraph-core: a concurrent index over a markdown vault.
//!
//! Scans a directory tree of interlinked markdown documents into an
//! in-memory catalog, extracts wiki links and tags, resolves links to
//! concrete files, and maintains derived tag and backlink maps that stay
//! safely queryable while a background build rebuilds them.

pub mod config;
pub mod parser;
pub mod vault;

pub use vault::catalog::{Catalog, CatalogEntry, EntryInfo, ScanError};
pub use vault::index::{BuildReport, SkippedFile, VaultIndex};
pub use vault::{Vault, VaultError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
