//! Cross-implementation check over a directory of dumps.
//!
//! Files are named `<a>_<b>_<run>_<impl>.<ext>`; the first two segments are
//! free-form, `run` is a decimal identifier and `impl` names the producing
//! implementation. Every pair of implementations within a run is compared.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hashmix_core::{ErrorInfo, HashmixError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::compare::{compare_dumps, Comparison, Tolerance};
use crate::dump::{parse_dump, Dump};

/// Run and implementation encoded in a dump file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFileName {
    /// Run identifier shared by dumps of the same inputs.
    pub run: u64,
    /// Name of the producing implementation.
    pub implementation: String,
}

impl DumpFileName {
    /// Parses `<a>_<b>_<run>_<impl>.<ext>`.
    pub fn parse(name: &str) -> Result<Self, HashmixError> {
        let invalid = || {
            HashmixError::FormatMismatch(
                ErrorInfo::new("dump-file-name", "dump file name is malformed")
                    .with_context("file", name)
                    .with_hint("expected <a>_<b>_<run>_<impl>.<ext>"),
            )
        };
        let stem = name.split('.').next().unwrap_or_default();
        let segments: Vec<&str> = stem.split('_').collect();
        let [_, _, run, implementation] = segments.as_slice() else {
            return Err(invalid());
        };
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid());
        }
        let run = run.parse().map_err(|_| invalid())?;
        Ok(Self {
            run,
            implementation: implementation.to_string(),
        })
    }
}

/// Outcome of comparing two implementations for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    /// First implementation.
    pub left: String,
    /// Second implementation.
    pub right: String,
    /// Mismatches between their dumps.
    pub comparison: Comparison,
}

/// All pairwise comparisons of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier.
    pub run: u64,
    /// Implementations found for the run, sorted.
    pub implementations: Vec<String>,
    /// One entry per implementation pair.
    pub pairs: Vec<PairReport>,
}

impl RunReport {
    /// Returns `true` when every pair agrees.
    pub fn is_consistent(&self) -> bool {
        self.pairs.iter().all(|pair| pair.comparison.is_match())
    }
}

/// Result of [`check_directory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Directory that was checked.
    pub directory: PathBuf,
    /// Tolerance used for float lines.
    pub tolerance: Tolerance,
    /// Runs in ascending order.
    pub runs: Vec<RunReport>,
}

impl CheckReport {
    /// Returns `true` when every run is consistent.
    pub fn is_consistent(&self) -> bool {
        self.runs.iter().all(RunReport::is_consistent)
    }

    /// Number of mismatching lines across all pairs.
    pub fn mismatch_count(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|run| &run.pairs)
            .map(|pair| pair.comparison.mismatches.len())
            .sum()
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String, HashmixError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            HashmixError::FormatMismatch(ErrorInfo::new("report-serialize", err.to_string()))
        })
    }
}

fn read_dump(path: &Path) -> Result<Dump, HashmixError> {
    let text = fs::read_to_string(path).map_err(|err| {
        HashmixError::FormatMismatch(
            ErrorInfo::new("dump-read", format!("failed to read dump: {err}"))
                .with_context("file", path.display()),
        )
    })?;
    parse_dump(&text).map_err(|err| err.with_context("file", path.display()))
}

/// Collects the dumps of `dir` (not recursive) grouped by run.
pub fn collect_runs(dir: &Path) -> Result<BTreeMap<u64, BTreeMap<String, PathBuf>>, HashmixError> {
    let mut runs: BTreeMap<u64, BTreeMap<String, PathBuf>> = BTreeMap::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|err| {
            HashmixError::FormatMismatch(
                ErrorInfo::new("dump-dir", err.to_string()).with_context("dir", dir.display()),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let parsed = DumpFileName::parse(&name)?;
        if let Some(previous) = runs
            .entry(parsed.run)
            .or_default()
            .insert(parsed.implementation, entry.path().to_path_buf())
        {
            warn!(
                "run {}: {} shadowed by {}",
                parsed.run,
                previous.display(),
                entry.path().display()
            );
        }
    }
    Ok(runs)
}

/// Compares every implementation pair of every run found in `dir`.
pub fn check_directory(dir: &Path, tolerance: Tolerance) -> Result<CheckReport, HashmixError> {
    let mut report = CheckReport {
        directory: dir.to_path_buf(),
        tolerance,
        runs: Vec::new(),
    };
    for (run, files) in collect_runs(dir)? {
        let mut dumps = Vec::with_capacity(files.len());
        for (name, path) in &files {
            dumps.push((name.clone(), read_dump(path)?));
        }
        let mut pairs = Vec::new();
        for (i, (left, left_dump)) in dumps.iter().enumerate() {
            for (right, right_dump) in &dumps[i + 1..] {
                debug!("run {run}: comparing {left} with {right}");
                let comparison = compare_dumps(left_dump, right_dump, tolerance);
                if !comparison.is_match() {
                    warn!(
                        "run {run}: {left} and {right} disagree on {} line(s)",
                        comparison.mismatches.len()
                    );
                }
                pairs.push(PairReport {
                    left: left.clone(),
                    right: right.clone(),
                    comparison,
                });
            }
        }
        info!("run {run}: {} implementation(s), {} pair(s)", dumps.len(), pairs.len());
        report.runs.push(RunReport {
            run,
            implementations: files.into_keys().collect(),
            pairs,
        });
    }
    Ok(report)
}
