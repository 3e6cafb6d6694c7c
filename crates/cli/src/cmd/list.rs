//! List command: print the catalog.

use std::path::Path;

use super::open_vault;

pub fn run(root: &Path) {
    let vault = open_vault(root);

    for entry in vault.entries() {
        if entry.id.is_empty() {
            continue; // the root itself
        }
        if entry.is_dir {
            println!("{}/", entry.id);
        } else {
            println!("{}", entry.id);
        }
    }
}
