//! Scan command: build the index and report statistics.

use std::path::Path;

use tracing::debug;

use super::open_indexed;

pub fn run(root: &Path) {
    let vault = open_indexed(root);

    let Some(report) = vault.last_build_report() else {
        eprintln!("Error: no build report available");
        std::process::exit(1);
    };

    debug!(
        documents = report.documents_indexed,
        skipped = report.skipped.len(),
        duration_ms = report.duration_ms,
        "vault scan complete"
    );

    println!("vault: {}", vault.root().display());
    println!("documents indexed: {}", report.documents_indexed);
    println!("duration: {}ms", report.duration_ms);

    if !report.skipped.is_empty() {
        println!("skipped: {}", report.skipped.len());
        for skip in &report.skipped {
            println!("  {}: {}", skip.id, skip.reason);
        }
    }
}
