//! # Cantina Application Entry Point
//!
//! Parses the command line, builds the async runtime and hands control to
//! the library's `run` (bootstrap, database, console loop).

use std::path::PathBuf;

use clap::Parser;

use cantina_manager::RunOptions;

/// Cantina — cafeteria menu manager.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Directory for rendered reports (overrides the config file)
    #[arg(long)]
    reports_dir: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().expect("failed to build async runtime");

    let options = RunOptions {
        config: args.config,
        database: args.database,
        reports_dir: args.reports_dir,
    };

    if let Err(e) = cantina_manager::run(&runtime, options) {
        eprintln!("error: {}", e.message);
        std::process::exit(1);
    }
}
