//! Concurrent access during background index builds.

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use notegraph_core::Vault;

const INDEX_WAIT: Duration = Duration::from_secs(30);
const DOCS: usize = 60;

/// A vault where every document links to `hub.md` and carries `#common`, so
/// any partially-populated index would be observable as a partial count.
fn linked_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(root.join("hub.md"), "the hub #common").unwrap();
    for i in 0..DOCS {
        fs::write(
            root.join(format!("note{i:03}.md")),
            format!("note {i} links to [[hub]] with #common and #topic{i}"),
        )
        .unwrap();
    }

    dir
}

#[test]
fn concurrent_reads_never_observe_partial_index() {
    let dir = linked_vault();
    let vault = Vault::open(dir.path()).unwrap();

    let mut readers = Vec::new();
    for _ in 0..8 {
        let vault = Arc::clone(&vault);
        readers.push(thread::spawn(move || {
            for _ in 0..200 {
                let with_tag = vault.files_with_tag("common");
                // all docs plus the hub, or nothing yet; never a slice
                assert!(
                    with_tag.is_empty() || with_tag.len() == DOCS + 1,
                    "partial tag index observed: {} entries",
                    with_tag.len()
                );

                let backlinks = vault.backlinks("hub.md");
                assert!(
                    backlinks.is_empty() || backlinks.len() == DOCS,
                    "partial backlink index observed: {} entries",
                    backlinks.len()
                );

                let hits = vault.search("note 7 ");
                assert!(hits.len() <= 1);
            }
        }));
    }

    for reader in readers {
        reader.join().expect("reader panicked");
    }

    assert!(vault.wait_until_indexed(INDEX_WAIT));
    assert_eq!(vault.backlinks("hub.md").len(), DOCS);
}

#[test]
fn rescan_during_build_commits_against_latest_catalog() {
    let dir = linked_vault();
    let vault = Vault::open(dir.path()).unwrap();

    // Pile catalog changes on top of the in-flight initial build; the final
    // committed index must reflect the last catalog, not a stale snapshot.
    for i in 0..3 {
        let id = format!("extra{i}.md");
        fs::write(dir.path().join(&id), "late arrival [[hub]] #common").unwrap();
        vault.rescan().unwrap();
    }

    assert!(vault.wait_until_indexed(INDEX_WAIT));

    let backlinks = vault.backlinks("hub.md");
    assert_eq!(backlinks.len(), DOCS + 3);
    assert!(backlinks.contains(&"extra2.md".to_string()));
    assert_eq!(vault.files_with_tag("common").len(), DOCS + 4);
}

#[test]
fn writes_during_build_do_not_corrupt_state() {
    let dir = linked_vault();
    let vault = Vault::open(dir.path()).unwrap();

    let writer = {
        let vault = Arc::clone(&vault);
        thread::spawn(move || {
            for i in 0..50 {
                let id = format!("note{:03}.md", i % DOCS);
                vault
                    .write_file(&id, &format!("rewritten {i} [[hub]] #common"))
                    .unwrap();
            }
        })
    };

    let reader = {
        let vault = Arc::clone(&vault);
        thread::spawn(move || {
            for i in 0..50 {
                let id = format!("note{:03}.md", i % DOCS);
                // may see old or new content, must never fail
                vault.read_file(&id).unwrap();
            }
        })
    };

    writer.join().expect("writer panicked");
    reader.join().expect("reader panicked");

    // a rescan settles everything
    vault.rescan().unwrap();
    assert!(vault.wait_until_indexed(INDEX_WAIT));
    assert_eq!(vault.backlinks("hub.md").len(), DOCS);
}

#[test]
fn reads_remain_available_while_build_is_in_flight() {
    let dir = linked_vault();
    let vault = Vault::open(dir.path()).unwrap();

    // catalog reads work before the index is ready
    assert_eq!(vault.find_file("hub").as_deref(), Some("hub.md"));
    assert!(vault.read_file("note000.md").unwrap().contains("note 0"));

    assert!(vault.wait_until_indexed(INDEX_WAIT));
    assert!(vault.is_indexed());
}
