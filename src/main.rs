use anyhow::Result;
use clap::Parser;
use std::process;
use treesub::args::{Args, Config};
use tracing_subscriber::EnvFilter;

/// Main entry point of the application
/// Handles argument parsing and executes the program with error handling
fn main() {
    let args = Args::parse();

    if args.debug {
        init_tracing();
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    treesub::run(&config)
}

/// Send the diagnostic trace to stderr; RUST_LOG overrides the default `debug` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
