use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use hashmix_verify::{check_directory, CheckReport, MismatchKind, Tolerance};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory holding `<a>_<b>_<run>_<impl>.<ext>` dumps.
    #[arg(long)]
    pub dir: PathBuf,
    /// Absolute tolerance for float lines.
    #[arg(long, default_value_t = 1e-16)]
    pub tolerance: f64,
    /// Optional JSON report path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn summarize(report: &CheckReport) {
    for run in &report.runs {
        let status = if run.is_consistent() { "ok" } else { "MISMATCH" };
        println!(
            "run {}: {} [{}]",
            run.run,
            status,
            run.implementations.join(", ")
        );
        for pair in &run.pairs {
            if pair.comparison.is_match() {
                continue;
            }
            println!(
                "  {} vs {}: format lines {:?}, value lines {:?}",
                pair.left,
                pair.right,
                pair.comparison.lines(MismatchKind::Format),
                pair.comparison.lines(MismatchKind::Value)
            );
        }
    }
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let tolerance = Tolerance::from_f64(args.tolerance)?;
    let report = check_directory(&args.dir, tolerance)?;
    summarize(&report);
    if let Some(path) = &args.report {
        fs::write(path, report.to_json()?)?;
    }
    if !report.is_consistent() {
        return Err(format!(
            "{} mismatching line(s) across {} run(s)",
            report.mismatch_count(),
            report.runs.len()
        )
        .into());
    }
    Ok(())
}
