use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    generate::{self, GenerateArgs},
    version::{self, VersionArgs},
};

mod commands;
mod plan;

#[derive(Parser, Debug)]
#[command(name = "hashmix", about = "Hash-diffused PRNG dump generator and checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a device from a seed and write its dump for a list of requests.
    Generate(GenerateArgs),
    /// Compare dumps written by different implementations.
    Check(CheckArgs),
    /// Print the tool version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Check(args) => check::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
