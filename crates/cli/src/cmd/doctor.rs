//! Doctor command: validate configuration and the resolved vault root.

use std::path::Path;

use notegraph_core::config::{default_config_path, Config};

pub fn run(config_path: Option<&Path>, vault_override: Option<&Path>) {
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("FAIL ngr doctor");
            println!("{e}");
            std::process::exit(1);
        }
    };

    let root = vault_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.vault_root());

    println!("OK   ngr doctor");
    match config_path {
        Some(p) => println!("config: {}", p.display()),
        None => {
            if let Ok(p) = default_config_path() {
                println!("config: {}", p.display());
            }
        }
    }
    println!("vault_root: {}", root.display());
    println!("theme: {}", config.theme);
    println!("logging.level: {}", config.logging.level);

    if !root.is_dir() {
        println!("warning: vault root is not a directory");
        std::process::exit(1);
    }
}
