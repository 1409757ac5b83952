//! Line-by-line comparison of two parsed dumps.

use hashmix_core::{ErrorInfo, HashmixError};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::dump::{Dump, Fields, Fixed, Record};

/// Absolute tolerance for `v_vec_f64` fields, in units of `10^-16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Largest accepted distance.
    pub units: u128,
}

impl Tolerance {
    /// Exact comparison.
    pub const EXACT: Tolerance = Tolerance { units: 0 };

    /// Converts a decimal tolerance such as `1e-16`.
    pub fn from_f64(value: f64) -> Result<Self, HashmixError> {
        if !value.is_finite() || value < 0.0 {
            return Err(HashmixError::InvalidArgument(
                ErrorInfo::new("tolerance", "tolerance must be a finite non-negative number")
                    .with_context("tolerance", value),
            ));
        }
        Ok(Self {
            units: (value * 1e16).round() as u128,
        })
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { units: 1 }
    }
}

/// Why two lines disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// Keys, field counts or line counts differ.
    Format,
    /// Values differ beyond the tolerance.
    Value,
}

/// A single mismatching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// 1-based line number.
    pub line: usize,
    /// Kind of disagreement.
    pub kind: MismatchKind,
    /// Short description.
    pub detail: String,
}

/// Every mismatch found between two dumps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Mismatches in line order.
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    /// Returns `true` when the dumps agree.
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Line numbers with the given mismatch kind.
    pub fn lines(&self, kind: MismatchKind) -> Vec<usize> {
        self.mismatches
            .iter()
            .filter(|mismatch| mismatch.kind == kind)
            .map(|mismatch| mismatch.line)
            .collect()
    }

    /// Converts the comparison into an error when anything disagrees.
    ///
    /// Any format mismatch makes the whole comparison a
    /// [`HashmixError::FormatMismatch`]; value mismatches alone yield
    /// [`HashmixError::ConsistencyMismatch`]. The context lists every line.
    pub fn into_result(self) -> Result<(), HashmixError> {
        if self.is_match() {
            return Ok(());
        }
        let all_lines = join_lines(self.mismatches.iter().map(|m| m.line));
        let format_lines = self.lines(MismatchKind::Format);
        if !format_lines.is_empty() {
            let info = ErrorInfo::new("dump-layout", "dumps differ in layout")
                .with_context("format_lines", join_lines(format_lines.into_iter()))
                .with_context("lines", all_lines);
            return Err(HashmixError::FormatMismatch(info));
        }
        let info = ErrorInfo::new("dump-values", "dumps differ in values")
            .with_context("lines", all_lines)
            .with_context("count", self.mismatches.len());
        Err(HashmixError::ConsistencyMismatch(info))
    }
}

fn join_lines(lines: impl Iterator<Item = usize>) -> String {
    lines.map(|line| line.to_string()).collect::<Vec<_>>().join(",")
}

/// Compares two dumps line by line.
///
/// Non-float fields must match exactly; `v_vec_f64` fields may differ by at
/// most `tolerance`. A line-count difference is reported once, at the first
/// line missing from the shorter dump.
pub fn compare_dumps(left: &Dump, right: &Dump, tolerance: Tolerance) -> Comparison {
    let mut mismatches = Vec::new();
    for (index, (a, b)) in left.records.iter().zip(&right.records).enumerate() {
        if let Some(mismatch) = compare_records(index + 1, a, b, tolerance) {
            mismatches.push(mismatch);
        }
    }
    if left.len() != right.len() {
        mismatches.push(Mismatch {
            line: left.len().min(right.len()) + 1,
            kind: MismatchKind::Format,
            detail: format!("line counts differ: {} vs {}", left.len(), right.len()),
        });
    }
    for mismatch in &mismatches {
        warn!("line {}: {}", mismatch.line, mismatch.detail);
    }
    Comparison { mismatches }
}

fn compare_records(line: usize, a: &Record, b: &Record, tolerance: Tolerance) -> Option<Mismatch> {
    let layout = |detail: String| Mismatch {
        line,
        kind: MismatchKind::Format,
        detail,
    };
    if a.key != b.key {
        return Some(layout(format!("keys differ: {} vs {}", a.key, b.key)));
    }
    if a.fields.len() != b.fields.len() {
        return Some(layout(format!(
            "{} field counts differ: {} vs {}",
            a.key,
            a.fields.len(),
            b.fields.len()
        )));
    }
    let differing = differing_fields(&a.fields, &b.fields, tolerance);
    let first = *differing.first()?;
    Some(Mismatch {
        line,
        kind: MismatchKind::Value,
        detail: format!(
            "{} differs in {} field(s), first at index {}",
            a.key,
            differing.len(),
            first
        ),
    })
}

fn differing_fields(a: &Fields, b: &Fields, tolerance: Tolerance) -> Vec<usize> {
    fn exact<T: PartialEq>(a: &[T], b: &[T]) -> Vec<usize> {
        a.iter()
            .zip(b)
            .enumerate()
            .filter(|(_, (x, y))| x != y)
            .map(|(index, _)| index)
            .collect()
    }
    match (a, b) {
        (Fields::Bytes(a), Fields::Bytes(b)) => exact(a, b),
        (Fields::Words(a), Fields::Words(b)) => exact(a, b),
        (Fields::Cursor(a), Fields::Cursor(b)) => exact(&[*a], &[*b]),
        (Fields::Floats(a), Fields::Floats(b)) => a
            .iter()
            .zip(b)
            .enumerate()
            .filter(|(_, (x, y))| Fixed::distance(**x, **y) > tolerance.units)
            .map(|(index, _)| index)
            .collect(),
        // equal keys always parse to the same field kind
        _ => vec![0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump::parse_dump;

    fn dump(text: &str) -> Dump {
        parse_dump(text).unwrap()
    }

    #[test]
    fn floats_within_one_unit_match() {
        let left = dump("v_vec_f64:0.1000000000000000,0.2000000000000000\n");
        let right = dump("v_vec_f64:0.1000000000000001,0.1999999999999999\n");
        assert!(compare_dumps(&left, &right, Tolerance::default()).is_match());

        let comparison = compare_dumps(&left, &right, Tolerance::EXACT);
        assert_eq!(comparison.lines(MismatchKind::Value), vec![1]);
    }

    #[test]
    fn every_mismatch_is_reported() {
        let left = dump("idx_values_mult:1\nidx_values_xor:2\nv_vec_u64:0000000000000001\n");
        let right = dump("idx_values_mult:3\nidx_values_xor:2\nv_vec_u64:0000000000000002\n");
        let comparison = compare_dumps(&left, &right, Tolerance::default());
        assert_eq!(comparison.lines(MismatchKind::Value), vec![1, 3]);

        let err = comparison.into_result().unwrap_err();
        assert!(matches!(err, HashmixError::ConsistencyMismatch(_)));
        assert_eq!(err.info().context["lines"], "1,3");
    }

    #[test]
    fn layout_differences_are_format_mismatches() {
        let left = dump("v_vec_u64:\nidx_values_mult:1\nidx_values_xor:0\n");
        let right = dump("v_vec_u64:0000000000000000\nidx_values_mult:2\n");
        let comparison = compare_dumps(&left, &right, Tolerance::default());
        assert_eq!(comparison.lines(MismatchKind::Format), vec![1, 3]);
        assert_eq!(comparison.lines(MismatchKind::Value), vec![2]);

        let err = comparison.into_result().unwrap_err();
        assert!(matches!(err, HashmixError::FormatMismatch(_)));
        assert_eq!(err.info().context["lines"], "1,2,3");
    }

    #[test]
    fn tolerance_conversion() {
        assert_eq!(Tolerance::from_f64(1e-16).unwrap(), Tolerance::default());
        assert_eq!(Tolerance::from_f64(0.0).unwrap(), Tolerance::EXACT);
        assert!(Tolerance::from_f64(-1.0).is_err());
        assert!(Tolerance::from_f64(f64::NAN).is_err());
    }
}
