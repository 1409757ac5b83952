//! One-time derivation of the generator parameters from the absorbed seed.

use crate::bank::Snapshot;
use crate::buffer::StateBuffer;
use crate::diffuse::next_state;

/// Diffuses `buffer` six times, capturing its word view after each step.
///
/// Captures fill `mult_x`, `mult_a`, `mult_b`, `xor_x`, `xor_a`, `xor_b` in
/// that order; the buffer is never reset between them and is left in its
/// final diffused state. Parity rules are applied once all six are captured.
pub fn derive_parameters(buffer: &mut StateBuffer) -> Snapshot {
    let mut capture = || {
        next_state(buffer);
        buffer.words()
    };
    let mult_x = capture();
    let mult_a = capture();
    let mult_b = capture();
    let xor_x = capture();
    let xor_a = capture();
    let xor_b = capture();

    let mut snapshot = Snapshot::from_arrays(mult_x, mult_a, mult_b, xor_x, xor_a, xor_b);
    snapshot.enforce_parity();
    snapshot
}
