//! Text dump format shared by every implementation of the generator.
//!
//! A dump is a sequence of `key:value` lines. The state block lists the
//! buffer bytes, the six generator arrays of the current snapshot and both
//! cursors; output lines carry the values of one request. Fields are
//! comma separated without spaces.

use std::fmt;

use crate::bank::Snapshot;
use crate::buffer::StateBuffer;
use crate::request::Output;

/// Line keys of the dump format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DumpKey {
    /// `v_state_u8`
    StateBytes,
    /// `v_x_mult`
    MultX,
    /// `v_a_mult`
    MultA,
    /// `v_b_mult`
    MultB,
    /// `v_x_xor`
    XorX,
    /// `v_a_xor`
    XorA,
    /// `v_b_xor`
    XorB,
    /// `idx_values_mult`
    IdxMult,
    /// `idx_values_xor`
    IdxXor,
    /// `v_vec_u64`
    VecU64,
    /// `v_vec_f64`
    VecF64,
}

/// How the value part of a line is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Two uppercase hex digits per field.
    Byte,
    /// Sixteen uppercase hex digits per field.
    Word,
    /// A single decimal integer.
    Cursor,
    /// Fixed-point decimals with [`FLOAT_DIGITS`] fractional digits.
    Fixed,
}

/// Fractional digits written for float outputs.
pub const FLOAT_DIGITS: usize = 16;

impl DumpKey {
    /// Keys of a state block, in emission order.
    pub const STATE_BLOCK: [DumpKey; 9] = [
        DumpKey::StateBytes,
        DumpKey::MultX,
        DumpKey::MultA,
        DumpKey::MultB,
        DumpKey::XorX,
        DumpKey::XorA,
        DumpKey::XorB,
        DumpKey::IdxMult,
        DumpKey::IdxXor,
    ];

    /// Every key the format knows.
    pub const ALL: [DumpKey; 11] = [
        DumpKey::StateBytes,
        DumpKey::MultX,
        DumpKey::MultA,
        DumpKey::MultB,
        DumpKey::XorX,
        DumpKey::XorA,
        DumpKey::XorB,
        DumpKey::IdxMult,
        DumpKey::IdxXor,
        DumpKey::VecU64,
        DumpKey::VecF64,
    ];

    /// Key text as written in dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            DumpKey::StateBytes => "v_state_u8",
            DumpKey::MultX => "v_x_mult",
            DumpKey::MultA => "v_a_mult",
            DumpKey::MultB => "v_b_mult",
            DumpKey::XorX => "v_x_xor",
            DumpKey::XorA => "v_a_xor",
            DumpKey::XorB => "v_b_xor",
            DumpKey::IdxMult => "idx_values_mult",
            DumpKey::IdxXor => "idx_values_xor",
            DumpKey::VecU64 => "v_vec_u64",
            DumpKey::VecF64 => "v_vec_f64",
        }
    }

    /// Looks a key up by its text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Encoding of the line's value part.
    pub fn field_kind(&self) -> FieldKind {
        match self {
            DumpKey::StateBytes => FieldKind::Byte,
            DumpKey::IdxMult | DumpKey::IdxXor => FieldKind::Cursor,
            DumpKey::VecF64 => FieldKind::Fixed,
            _ => FieldKind::Word,
        }
    }
}

impl fmt::Display for DumpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins bytes as two-digit uppercase hex.
pub fn format_bytes(bytes: &[u8]) -> String {
    join(bytes.iter().map(|byte| format!("{byte:02X}")))
}

/// Joins words as sixteen-digit uppercase hex.
pub fn format_words(words: &[u64]) -> String {
    join(words.iter().map(|word| format!("{word:016X}")))
}

/// Joins floats with [`FLOAT_DIGITS`] fractional digits.
pub fn format_floats(values: &[f64]) -> String {
    join(values.iter().map(|value| format!("{:.1$}", value, FLOAT_DIGITS)))
}

fn join(fields: impl Iterator<Item = String>) -> String {
    fields.collect::<Vec<_>>().join(",")
}

fn line(out: &mut String, key: DumpKey, value: &str) {
    out.push_str(key.as_str());
    out.push(':');
    out.push_str(value);
    out.push('\n');
}

/// Renders the nine-line state block for a buffer and snapshot.
pub fn render_state(buffer: &StateBuffer, snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for key in DumpKey::STATE_BLOCK {
        let value = match key {
            DumpKey::StateBytes => format_bytes(buffer.as_bytes()),
            DumpKey::MultX => format_words(&snapshot.mult_x),
            DumpKey::MultA => format_words(&snapshot.mult_a),
            DumpKey::MultB => format_words(&snapshot.mult_b),
            DumpKey::XorX => format_words(&snapshot.xor_x),
            DumpKey::XorA => format_words(&snapshot.xor_a),
            DumpKey::XorB => format_words(&snapshot.xor_b),
            DumpKey::IdxMult => snapshot.idx_mult.to_string(),
            DumpKey::IdxXor => snapshot.idx_xor.to_string(),
            DumpKey::VecU64 | DumpKey::VecF64 => continue,
        };
        line(&mut out, key, &value);
    }
    out
}

/// Renders the `v_vec_u64` / `v_vec_f64` line for an output.
pub fn render_output(output: &Output) -> String {
    let mut out = String::new();
    match output {
        Output::U64(words) => line(&mut out, DumpKey::VecU64, &format_words(words)),
        Output::F64(values) => line(&mut out, DumpKey::VecF64, &format_floats(values)),
    }
    out
}
