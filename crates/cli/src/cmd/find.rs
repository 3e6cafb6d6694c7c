//! Find command: resolve a wiki-style name to a document id.

use std::path::Path;

use super::open_vault;

pub fn run(root: &Path, name: &str) {
    let vault = open_vault(root);

    match vault.find_file(name) {
        Some(id) => println!("{id}"),
        None => {
            eprintln!("No file matching '{name}'");
            std::process::exit(1);
        }
    }
}
