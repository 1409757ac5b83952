//! SHA-256 mixing over the ring of 32-byte blocks.

use sha2::{Digest, Sha256};

use crate::buffer::StateBuffer;
use crate::BLOCK_SIZE;

/// Constant XORed into a block that equals its predecessor.
pub const DEGENERACY_MASK: [u8; BLOCK_SIZE] = degeneracy_mask();

const fn degeneracy_mask() -> [u8; BLOCK_SIZE] {
    let mut mask = [0u8; BLOCK_SIZE];
    let mut idx = 0;
    while idx < BLOCK_SIZE {
        mask[idx] = (idx + 1) as u8;
        idx += 1;
    }
    mask
}

/// Runs one diffusion round.
///
/// Block `i + 1` (mod the ring length) is rewritten as
/// `B ^ sha256(A) ^ sha256(B) ^ A` with `A` = block `i`, visiting `i` in
/// ascending order so later steps observe earlier updates. With a single
/// block `A` and `B` alias and the block collapses to zero.
pub fn diffusion_round(buffer: &mut StateBuffer) {
    let blocks = buffer.num_blocks();
    let bytes = buffer.as_bytes_mut();
    for idx in 0..blocks {
        let lo = idx * BLOCK_SIZE;
        let hi = ((idx + 1) % blocks) * BLOCK_SIZE;

        if bytes[lo..lo + BLOCK_SIZE] == bytes[hi..hi + BLOCK_SIZE] {
            for (byte, mask) in bytes[hi..hi + BLOCK_SIZE].iter_mut().zip(DEGENERACY_MASK) {
                *byte ^= mask;
            }
        }

        let a = copy_block(bytes, lo);
        let b = copy_block(bytes, hi);
        let hash_a = Sha256::digest(a);
        let hash_b = Sha256::digest(b);
        for j in 0..BLOCK_SIZE {
            bytes[hi + j] = b[j] ^ hash_a[j] ^ hash_b[j] ^ a[j];
        }
    }
}

/// Two back-to-back diffusion rounds.
pub fn next_state(buffer: &mut StateBuffer) {
    diffusion_round(buffer);
    diffusion_round(buffer);
}

fn copy_block(bytes: &[u8], start: usize) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&bytes[start..start + BLOCK_SIZE]);
    block
}
