//! Generator arrays, cursors and the current/previous snapshot pair.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HashmixError};

/// Residue class a parameter array is forced into after derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityRule {
    /// Modulus of the residue class.
    pub modulus: u64,
    /// Required residue.
    pub residue: u64,
}

impl ParityRule {
    /// Multiplier of the multiplicative lanes: `a ≡ 1 (mod 4)`.
    pub const MULT_A: ParityRule = ParityRule::new(4, 1);
    /// Increment of the multiplicative lanes: odd.
    pub const MULT_B: ParityRule = ParityRule::new(2, 1);
    /// XOR term of the feedback generator: even.
    pub const XOR_A: ParityRule = ParityRule::new(2, 0);
    /// Increment of the feedback generator: odd.
    pub const XOR_B: ParityRule = ParityRule::new(2, 1);

    /// Creates a rule for `value mod modulus == residue`.
    pub const fn new(modulus: u64, residue: u64) -> Self {
        Self { modulus, residue }
    }

    /// Moves `value` into the residue class: `value - value % m + c`, wrapping.
    pub fn apply(&self, value: u64) -> u64 {
        value
            .wrapping_sub(value % self.modulus)
            .wrapping_add(self.residue)
    }

    /// Returns `true` when `value` already satisfies the rule.
    pub fn holds(&self, value: u64) -> bool {
        value % self.modulus == self.residue
    }
}

/// One complete state of the coupled generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// State of each multiplicative lane.
    pub mult_x: Vec<u64>,
    /// Multiplier of each multiplicative lane.
    pub mult_a: Vec<u64>,
    /// Increment of each multiplicative lane.
    pub mult_b: Vec<u64>,
    /// States of the XOR-feedback generator; the entry at `idx_xor` masks lanes.
    pub xor_x: Vec<u64>,
    /// XOR terms of the feedback generator.
    pub xor_a: Vec<u64>,
    /// Increments of the feedback generator.
    pub xor_b: Vec<u64>,
    /// Next multiplicative lane to advance.
    pub idx_mult: usize,
    /// Feedback entry currently used as the lane mask.
    pub idx_xor: usize,
}

impl Snapshot {
    /// Assembles a snapshot with both cursors at zero.
    pub fn from_arrays(
        mult_x: Vec<u64>,
        mult_a: Vec<u64>,
        mult_b: Vec<u64>,
        xor_x: Vec<u64>,
        xor_a: Vec<u64>,
        xor_b: Vec<u64>,
    ) -> Self {
        Self {
            mult_x,
            mult_a,
            mult_b,
            xor_x,
            xor_a,
            xor_b,
            idx_mult: 0,
            idx_xor: 0,
        }
    }

    /// Number of lanes `W`.
    pub fn width(&self) -> usize {
        self.mult_x.len()
    }

    /// Arrays in dump order, paired with their field names.
    pub fn arrays(&self) -> [(&'static str, &[u64]); 6] {
        [
            ("mult_x", self.mult_x.as_slice()),
            ("mult_a", self.mult_a.as_slice()),
            ("mult_b", self.mult_b.as_slice()),
            ("xor_x", self.xor_x.as_slice()),
            ("xor_a", self.xor_a.as_slice()),
            ("xor_b", self.xor_b.as_slice()),
        ]
    }

    /// Forces the parameter arrays into their residue classes.
    pub fn enforce_parity(&mut self) {
        let rules = [
            (&mut self.mult_a, ParityRule::MULT_A),
            (&mut self.mult_b, ParityRule::MULT_B),
            (&mut self.xor_a, ParityRule::XOR_A),
            (&mut self.xor_b, ParityRule::XOR_B),
        ];
        for (values, rule) in rules {
            for value in values.iter_mut() {
                *value = rule.apply(*value);
            }
        }
    }

    /// Checks array widths, parity invariants and cursor bounds.
    pub fn validate(&self) -> Result<(), HashmixError> {
        let width = self.width();
        if width == 0 {
            return Err(HashmixError::InvalidConfig(ErrorInfo::new(
                "snapshot-empty",
                "snapshot has no lanes",
            )));
        }
        for (name, values) in self.arrays() {
            if values.len() != width {
                let info = ErrorInfo::new("snapshot-width", "snapshot arrays differ in length")
                    .with_context("array", name)
                    .with_context("expected", width)
                    .with_context("actual", values.len());
                return Err(HashmixError::InvalidConfig(info));
            }
        }
        let rules = [
            ("mult_a", &self.mult_a, ParityRule::MULT_A),
            ("mult_b", &self.mult_b, ParityRule::MULT_B),
            ("xor_a", &self.xor_a, ParityRule::XOR_A),
            ("xor_b", &self.xor_b, ParityRule::XOR_B),
        ];
        for (name, values, rule) in rules {
            if let Some(index) = values.iter().position(|&value| !rule.holds(value)) {
                let info = ErrorInfo::new("snapshot-parity", "parameter violates its parity rule")
                    .with_context("array", name)
                    .with_context("index", index)
                    .with_context("modulus", rule.modulus)
                    .with_context("residue", rule.residue);
                return Err(HashmixError::InvalidConfig(info));
            }
        }
        for (name, cursor) in [("idx_mult", self.idx_mult), ("idx_xor", self.idx_xor)] {
            if cursor >= width {
                let info = ErrorInfo::new("snapshot-cursor", "cursor is outside the lane range")
                    .with_context("cursor", name)
                    .with_context("value", cursor)
                    .with_context("width", width);
                return Err(HashmixError::InvalidConfig(info));
            }
        }
        Ok(())
    }
}

/// Current and previous snapshots.
///
/// The two snapshots are separately owned values; checkpoint and restore copy
/// contents between them and never share storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorBank {
    current: Snapshot,
    previous: Snapshot,
}

impl GeneratorBank {
    /// Creates a bank whose previous snapshot is a copy of `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
        }
    }

    /// Snapshot advanced by extraction.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Last checkpointed snapshot.
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub(crate) fn current_mut(&mut self) -> &mut Snapshot {
        &mut self.current
    }

    /// Copies the current snapshot into the previous one.
    pub fn checkpoint(&mut self) {
        self.previous.clone_from(&self.current);
        debug!(
            "checkpoint taken at idx_mult={}, idx_xor={}",
            self.previous.idx_mult, self.previous.idx_xor
        );
    }

    /// Copies the previous snapshot back into the current one.
    pub fn restore(&mut self) {
        self.current.clone_from(&self.previous);
        debug!(
            "restored checkpoint at idx_mult={}, idx_xor={}",
            self.current.idx_mult, self.current.idx_xor
        );
    }

    /// Replaces the previous snapshot after checking it fits this bank.
    pub fn install_previous(&mut self, snapshot: Snapshot) -> Result<(), HashmixError> {
        snapshot.validate()?;
        if snapshot.width() != self.current.width() {
            let info = ErrorInfo::new("snapshot-width", "snapshot width differs from the device")
                .with_context("expected", self.current.width())
                .with_context("actual", snapshot.width());
            return Err(HashmixError::InvalidConfig(info));
        }
        self.previous = snapshot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::from_arrays(
            vec![1, 2],
            vec![u64::MAX, 6],
            vec![8, 9],
            vec![3, 4],
            vec![5, 7],
            vec![10, 11],
        );
        snapshot.enforce_parity();
        snapshot
    }

    #[test]
    fn parity_rules_wrap_instead_of_failing() {
        assert_eq!(ParityRule::MULT_A.apply(u64::MAX), u64::MAX - 2);
        assert_eq!(ParityRule::MULT_A.apply(6), 5);
        assert_eq!(ParityRule::XOR_A.apply(7), 6);
        assert_eq!(ParityRule::XOR_B.apply(10), 11);
    }

    #[test]
    fn enforced_snapshot_validates() {
        let snapshot = sample();
        assert_eq!(snapshot.mult_a, vec![u64::MAX - 2, 5]);
        assert_eq!(snapshot.mult_b, vec![9, 9]);
        assert_eq!(snapshot.xor_a, vec![4, 6]);
        assert_eq!(snapshot.xor_b, vec![11, 11]);
        snapshot.validate().unwrap();
    }

    #[test]
    fn validate_reports_the_failing_array() {
        let mut snapshot = sample();
        snapshot.xor_b[1] = 2;
        let err = snapshot.validate().unwrap_err();
        assert_eq!(err.code(), "snapshot-parity");
        assert_eq!(err.info().context["array"], "xor_b");
        assert_eq!(err.info().context["index"], "1");

        let mut snapshot = sample();
        snapshot.idx_xor = 2;
        assert_eq!(snapshot.validate().unwrap_err().code(), "snapshot-cursor");
    }

    #[test]
    fn restore_copies_values() {
        let mut bank = GeneratorBank::new(sample());
        bank.current_mut().mult_x[0] = 99;
        bank.current_mut().idx_mult = 1;
        assert_eq!(bank.previous().mult_x[0], 1);

        bank.restore();
        assert_eq!(bank.current(), bank.previous());
        bank.current_mut().mult_x[1] = 42;
        assert_eq!(bank.previous().mult_x[1], 2);

        bank.checkpoint();
        assert_eq!(bank.previous().mult_x[1], 42);
    }

    #[test]
    fn install_previous_rejects_other_widths() {
        let mut bank = GeneratorBank::new(sample());
        let mut wide = sample();
        for (values, extra) in [
            (&mut wide.mult_x, 0),
            (&mut wide.mult_a, 1),
            (&mut wide.mult_b, 1),
            (&mut wide.xor_x, 0),
            (&mut wide.xor_a, 0),
            (&mut wide.xor_b, 1),
        ] {
            values.push(extra);
        }
        let err = bank.install_previous(wide).unwrap_err();
        assert_eq!(err.info().context["actual"], "3");
    }
}
