//! Streaming extraction from the coupled multiplicative / XOR-feedback lanes.
//!
//! Each emitted word advances one multiplicative lane:
//!
//! ```text
//! mult_x[p] = (mult_a[p] * mult_x[p] + mult_b[p]) ^ xor_x[idx_xor]
//! ```
//!
//! Whenever the lane cursor wraps to zero the feedback entry under `idx_xor`
//! steps once (`(xor_a ^ xor_x) + xor_b`) and the cursor moves on, which
//! changes the mask for the next epoch. All arithmetic wraps.

use std::ops::Range;

use crate::bank::Snapshot;

/// Mask keeping the 53 mantissa bits used for floats.
pub const FLOAT_MASK: u64 = 0x001F_FFFF_FFFF_FFFF;

/// `2^-53`, the spacing of the floats produced by [`to_unit_f64`].
pub const FLOAT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Fills `out` with the next words of the stream.
///
/// Work is split at epoch boundaries: lanes from the current cursor to the
/// end of the bank, then whole epochs, then the remainder. Every boundary
/// crossed steps the feedback generator exactly once, so the result is
/// identical to calling [`next_word`] `out.len()` times.
pub fn fill_words(snapshot: &mut Snapshot, out: &mut [u64]) {
    let width = snapshot.width();
    let mut filled = 0;
    while filled < out.len() {
        let start = snapshot.idx_mult;
        let take = (width - start).min(out.len() - filled);
        advance_lanes(snapshot, start..start + take, &mut out[filled..filled + take]);
        filled += take;

        snapshot.idx_mult = start + take;
        if snapshot.idx_mult == width {
            snapshot.idx_mult = 0;
            advance_feedback(snapshot);
        }
    }
}

/// Produces a single word, one lane at a time.
pub fn next_word(snapshot: &mut Snapshot) -> u64 {
    let lane = snapshot.idx_mult;
    let mask = snapshot.xor_x[snapshot.idx_xor];
    let value = step_lane(
        snapshot.mult_a[lane],
        snapshot.mult_x[lane],
        snapshot.mult_b[lane],
        mask,
    );
    snapshot.mult_x[lane] = value;

    snapshot.idx_mult += 1;
    if snapshot.idx_mult >= snapshot.width() {
        snapshot.idx_mult = 0;
        advance_feedback(snapshot);
    }
    value
}

/// Maps a word onto `[0, 1)` using its low 53 bits.
pub fn to_unit_f64(word: u64) -> f64 {
    (word & FLOAT_MASK) as f64 * FLOAT_SCALE
}

#[inline(always)]
fn step_lane(a: u64, x: u64, b: u64, mask: u64) -> u64 {
    a.wrapping_mul(x).wrapping_add(b) ^ mask
}

fn advance_lanes(snapshot: &mut Snapshot, lanes: Range<usize>, out: &mut [u64]) {
    let mask = snapshot.xor_x[snapshot.idx_xor];
    let xs = &mut snapshot.mult_x[lanes.clone()];
    let mult_a = &snapshot.mult_a[lanes.clone()];
    let mult_b = &snapshot.mult_b[lanes];
    for (((slot, x), &a), &b) in out.iter_mut().zip(xs.iter_mut()).zip(mult_a).zip(mult_b) {
        *x = step_lane(a, *x, b, mask);
        *slot = *x;
    }
}

fn advance_feedback(snapshot: &mut Snapshot) {
    let k = snapshot.idx_xor;
    snapshot.xor_x[k] = (snapshot.xor_a[k] ^ snapshot.xor_x[k]).wrapping_add(snapshot.xor_b[k]);
    snapshot.idx_xor = (k + 1) % snapshot.width();
}
