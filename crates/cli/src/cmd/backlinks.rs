//! Backlinks command: documents linking to the given document.

use std::path::Path;

use super::open_indexed;

pub fn run(root: &Path, id: &str) {
    let vault = open_indexed(root);

    for source in vault.backlinks(id) {
        println!("{source}");
    }
}
