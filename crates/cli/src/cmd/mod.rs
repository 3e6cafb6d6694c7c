//! Command implementations. Each `run` prints results to stdout and exits
//! the process with a message on error.

pub mod backlinks;
pub mod doctor;
pub mod find;
pub mod list;
pub mod read;
pub mod scan;
pub mod search;
pub mod tags;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notegraph_core::Vault;

const INDEX_TIMEOUT: Duration = Duration::from_secs(60);

/// Open the vault rooted at `root` or exit.
fn open_vault(root: &Path) -> Arc<Vault> {
    match Vault::open(root) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("Error opening vault at {}: {e}", root.display());
            std::process::exit(1);
        }
    }
}

/// Open the vault and block until the background index build commits.
fn open_indexed(root: &Path) -> Arc<Vault> {
    let vault = open_vault(root);
    if !vault.wait_until_indexed(INDEX_TIMEOUT) {
        eprintln!("Error: index build did not complete within {INDEX_TIMEOUT:?}");
        std::process::exit(1);
    }
    vault
}
