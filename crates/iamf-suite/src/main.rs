use std::error::Error;
use std::path::Path;

use clap::{Parser, Subcommand};
use iamf_core::SuiteConfig;
use tracing_subscriber::EnvFilter;

use commands::{
    encode::{self, EncodeArgs},
    summary::{self, SummaryArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "iamf-suite", about = "IAMF test-vector encoding and coverage reports")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the encoder over every valid descriptor in the corpus.
    Encode(EncodeArgs),
    /// Write the per-test summary and per-section coverage tables.
    Summary(SummaryArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.command {
        Command::Encode(args) => encode::run(&args),
        Command::Summary(args) => summary::run(&args),
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<SuiteConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(SuiteConfig::load(path)?),
        None => Ok(SuiteConfig::default()),
    }
}
