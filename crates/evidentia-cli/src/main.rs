//! Evidentia CLI - Command-line interface for audit journal inspection and verification.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{canonicalize, get, inspect, list, verify};

#[derive(Parser)]
#[command(name = "evidentia")]
#[command(about = "Evidentia audit journal inspection and verification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entries in a journal
    List {
        /// Path to journal file
        journal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Stop after reading N entries (default: unlimited)
        #[arg(long)]
        max_entries: Option<u64>,
        /// Reject journals larger than SIZE bytes (default: unlimited)
        #[arg(long)]
        max_size: Option<u64>,
    },
    /// Verify entry hashes and the prev-hash chain of a journal
    Verify {
        /// Path to journal file
        journal: String,
        /// Exit with error code if any verification fails
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one entry by id
    Get {
        /// Path to journal file
        journal: String,
        /// Entry id
        id: u64,
    },
    /// Summarize a journal (entry counts, id range, chain status)
    Inspect {
        /// Path to journal file
        journal: String,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            journal,
            json,
            max_entries,
            max_size,
        } => list::run(journal, json, max_entries, max_size),
        Commands::Verify {
            journal,
            strict,
            json,
        } => verify::run(journal, strict, json),
        Commands::Get { journal, id } => get::run(journal, id),
        Commands::Inspect { journal } => inspect::run(journal),
        Commands::Canonicalize { input } => canonicalize::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
