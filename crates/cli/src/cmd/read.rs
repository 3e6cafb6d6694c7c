//! Read command: print one document's content.

use std::path::Path;

use super::open_vault;

pub fn run(root: &Path, id: &str) {
    let vault = open_vault(root);

    match vault.read_file(id) {
        Ok(content) => print!("{content}"),
        Err(e) => {
            eprintln!("Error reading {id}: {e}");
            std::process::exit(1);
        }
    }
}
