//! Search command: substring search over names and content.

use std::path::Path;

use super::open_vault;

pub fn run(root: &Path, query: &str) {
    let vault = open_vault(root);

    for id in vault.search(query) {
        println!("{id}");
    }
}
