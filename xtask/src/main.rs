mod roundtrip;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Development tasks for mathfield",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that every formula of a corpus file survives a serialize and
    /// parse cycle.
    Roundtrip(roundtrip::RoundtripArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Roundtrip(args) => roundtrip::run(args),
    }
}
