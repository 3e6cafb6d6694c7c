mod cmd;
mod logging;

use clap::{Parser, Subcommand};
use notegraph_core::config::Config;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ngr", version, about = "Markdown vault indexing, backlinks, and search")]
struct Cli {
    /// Vault root (overrides the configured vault_path)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan the vault, wait for the index build, and print statistics
    Scan,

    /// List catalogued entries
    List,

    /// Print a document's content
    Read { id: String },

    /// Case-insensitive substring search over names and content
    Search { query: String },

    /// Resolve a wiki-style name to a document id
    Find { name: String },

    /// List documents whose wiki links resolve to the given document
    Backlinks { id: String },

    /// List known tags, or the documents carrying one tag
    Tags { tag: Option<String> },

    /// Validate configuration and print resolved paths
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Doctor = cli.command {
        cmd::doctor::run(cli.config.as_deref(), cli.vault.as_deref());
        return;
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    let root = cli.vault.clone().unwrap_or_else(|| config.vault_root());

    match cli.command {
        Commands::Scan => cmd::scan::run(&root),
        Commands::List => cmd::list::run(&root),
        Commands::Read { id } => cmd::read::run(&root, &id),
        Commands::Search { query } => cmd::search::run(&root, &query),
        Commands::Find { name } => cmd::find::run(&root, &name),
        Commands::Backlinks { id } => cmd::backlinks::run(&root, &id),
        Commands::Tags { tag } => cmd::tags::run(&root, tag.as_deref()),
        Commands::Doctor => unreachable!("handled above"),
    }
}
