use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use hashmix_core::{parse_requests, DeviceConfig, DEFAULT_BUFFER_SIZE};
use log::info;

use crate::plan::RunPlan;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Seed bytes as hex (`01,A3,FF` or `01a3ff`).
    #[arg(long, required_unless_present = "plan", conflicts_with = "plan")]
    pub seed: Option<String>,
    /// State buffer size in bytes.
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    pub size: usize,
    /// Comma separated requests such as `u64:4,f64:3`.
    #[arg(long, default_value = "")]
    pub requests: String,
    /// YAML run plan replacing the seed, size and request flags.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Output file for the dump.
    #[arg(long)]
    pub out: PathBuf,
}

fn resolve_plan(args: &GenerateArgs) -> Result<RunPlan, Box<dyn Error>> {
    if let Some(path) = &args.plan {
        return RunPlan::from_yaml_file(path);
    }
    let Some(seed) = &args.seed else {
        return Err("--seed is required unless --plan is set".into());
    };
    Ok(RunPlan {
        seed: seed.clone(),
        config: DeviceConfig::with_buffer_size(args.size),
        requests: parse_requests(&args.requests)?,
    })
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let plan = resolve_plan(args)?;
    let text = plan.render()?;
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.out, &text)?;
    info!(
        "wrote {} line(s) for {} request(s) to {}",
        text.lines().count(),
        plan.requests.len(),
        args.out.display()
    );
    Ok(())
}
