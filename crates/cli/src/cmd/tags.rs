//! Tags command: list tags, or the documents carrying one.

use std::path::Path;

use super::open_indexed;

pub fn run(root: &Path, tag: Option<&str>) {
    let vault = open_indexed(root);

    match tag {
        Some(tag) => {
            for id in vault.files_with_tag(tag) {
                println!("{id}");
            }
        }
        None => {
            for tag in vault.tag_names() {
                println!("{tag}");
            }
        }
    }
}
