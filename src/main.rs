//! Boardroom CLI - Command-line interface for simulating and replaying runs.

// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Boardroom - A deterministic deck-building roguelike engine
#[derive(Parser, Debug)]
#[command(name = "boardroom")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Content catalog JSON file (default: builtin catalog)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Rules JSON file (default: builtin rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one run with the scripted player
    Run {
        /// Class to play
        #[arg(short, long, default_value = "pm")]
        class: String,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Play many runs in parallel and aggregate statistics
    Batch {
        /// Class to play
        #[arg(short, long, default_value = "pm")]
        class: String,

        /// Number of runs to play (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// List cards, enemies, classes and seats
    Catalog {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Replay a recorded run
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Stop after this many actions
        #[arg(long)]
        step: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| args.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = cli::Sources::load(args.content.as_deref(), args.rules.as_deref()).and_then(
        |sources| match args.command {
            Commands::Run {
                class,
                seed,
                format,
                save,
            } => cli::run::execute(&sources, &class, seed, format, save),

            Commands::Batch {
                class,
                games,
                seed,
                threads,
                format,
                progress,
            } => cli::batch::execute(&sources, &class, games, seed, threads, format, progress),

            Commands::Catalog { format } => cli::catalog::execute(&sources, format),

            Commands::Replay {
                recording,
                step,
                format,
            } => cli::replay::execute(&sources, &recording, step, format),
        },
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
