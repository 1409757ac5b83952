use std::error::Error;

use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit JSON including the dump format parameters.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    block_size: usize,
    default_buffer_size: usize,
    float_digits: usize,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        block_size: hashmix_core::BLOCK_SIZE,
        default_buffer_size: hashmix_core::DEFAULT_BUFFER_SIZE,
        float_digits: hashmix_core::serialize::FLOAT_DIGITS,
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
