//! slotdb CLI
//!
//! Runs one command against a slotdb file and prints the records it returns.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use slotdb::config::DEFAULT_MATCH_CHARS;
use slotdb::{Command, Config, Outcome};
use tracing_subscriber::{fmt, EnvFilter};

/// slotdb CLI
#[derive(Parser, Debug)]
#[command(name = "slotdb")]
#[command(about = "Single-file fixed-slot record store")]
#[command(version)]
struct Args {
    /// Database file
    file: PathBuf,

    /// Leading characters of a search term that `find` compares
    #[arg(long, default_value_t = DEFAULT_MATCH_CHARS)]
    match_chars: usize,

    /// Skip fsync after writes
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new database file, overwriting any existing one
    Create {
        /// Byte cap per text field, terminator included
        max_field_bytes: usize,

        /// Number of slots
        capacity: usize,
    },

    /// Print a record by id
    Get {
        id: usize,
    },

    /// Fill an empty slot
    Set {
        id: usize,
        name: String,
        email: String,
    },

    /// Empty a slot
    Delete {
        id: usize,
    },

    /// Print every occupied record
    List,

    /// Print records whose name or email starts with TERM (case-sensitive)
    Find {
        term: String,
    },

    /// Change the field cap and slot count, keeping what fits
    Resize {
        max_field_bytes: usize,
        capacity: usize,
    },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Create {
                max_field_bytes,
                capacity,
            } => Command::Create {
                max_field_bytes,
                capacity,
            },
            Commands::Get { id } => Command::Get { id },
            Commands::Set { id, name, email } => Command::Set { id, name, email },
            Commands::Delete { id } => Command::Delete { id },
            Commands::List => Command::List,
            Commands::Find { term } => Command::Find { term },
            Commands::Resize {
                max_field_bytes,
                capacity,
            } => Command::Resize {
                max_field_bytes,
                capacity,
            },
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries records only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .match_chars(args.match_chars)
        .sync_on_write(!args.no_sync)
        .build();

    tracing::debug!("slotdb v{}", slotdb::VERSION);

    // Every error ends the command; the connection has already been dropped
    match slotdb::run(&args.file, args.command.into(), &config) {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(outcome: &Outcome) {
    for record in outcome.records() {
        println!("{}", record);
    }
}
