//! Byte buffer with a platform-independent little-endian word view.

use crate::{BLOCK_SIZE, WORD_BYTES};

/// The `N`-byte state the diffuser mixes and the parameter deriver reads.
///
/// Bytes `8k..8k+8` compose word `k` in little-endian order on every target.
/// The same packing is used when the buffer is serialized, so the word view
/// never depends on host memory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBuffer {
    bytes: Vec<u8>,
}

impl StateBuffer {
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of 64-bit words in the word view.
    pub fn num_words(&self) -> usize {
        self.bytes.len() / WORD_BYTES
    }

    /// Number of 32-byte blocks in the diffusion ring.
    pub fn num_blocks(&self) -> usize {
        self.bytes.len() / BLOCK_SIZE
    }

    /// Returns the full word view.
    pub fn words(&self) -> Vec<u64> {
        self.bytes.chunks_exact(WORD_BYTES).map(pack_word).collect()
    }

    /// Returns a copy of block `index`.
    pub fn block(&self, index: usize) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        let start = index * BLOCK_SIZE;
        block.copy_from_slice(&self.bytes[start..start + BLOCK_SIZE]);
        block
    }
}

/// Packs up to eight bytes into a word, least significant byte first.
pub fn pack_word(chunk: &[u8]) -> u64 {
    chunk
        .iter()
        .take(WORD_BYTES)
        .enumerate()
        .fold(0u64, |acc, (shift, byte)| acc | (u64::from(*byte) << (8 * shift)))
}

/// Expands words into bytes, least significant byte first.
pub fn unpack_words(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}
