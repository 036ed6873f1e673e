//! kafkagen CLI - Compile Kafka-style message schemas into Rust
//!
//! Usage: `kafkagen [--config FILE] [-v...] [-q...] <DST> <SRC>...`
//!
//! Every complete request/response group is written to `DST`. Documents that
//! fail to load or compile are reported and skipped; the exit status is
//! non-zero only for bad arguments, a bad config file or an unusable `DST`.

use clap::{ArgAction, Parser};
use kafkagen_logging::{LogLevel, init_logging};
use std::path::PathBuf;

mod config;
mod generate;

use config::GeneratorConfig;

#[derive(Parser)]
#[command(name = "kafkagen")]
#[command(author, version, about = "Compile Kafka message schemas into Rust", long_about = None)]
struct Cli {
    /// Path to a kafkagen.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// Output directory for generated code
    dst: PathBuf,

    /// Schema documents to compile
    #[arg(required = true)]
    sources: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    let level = if cli.verbose > 0 || cli.quiet > 0 {
        LogLevel::from_verbosity(cli.verbose, cli.quiet)
    } else {
        config.level()?
    };
    init_logging(level);

    let report = generate::run(&config, &cli.dst, &cli.sources)?;
    println!("{}", generate::summary(&report));

    Ok(())
}
