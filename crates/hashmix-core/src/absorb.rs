//! Folding of arbitrary-length seed material into the state buffer.

use log::debug;

use crate::buffer::StateBuffer;
use crate::config::validate_buffer_size;
use crate::errors::{ErrorInfo, HashmixError};

/// Folds `seed` into a zeroed buffer of `buffer_size` bytes.
///
/// Seeds no longer than the buffer are XORed into its prefix. Longer seeds
/// are consumed in whole windows of `buffer_size` bytes while at least one
/// more byte follows the window; the final window (between one byte and a
/// full buffer) is not folded in. A seed of exactly `2N` bytes therefore
/// absorbs to the same buffer as its first `N` bytes.
pub fn absorb_seed(seed: &[u8], buffer_size: usize) -> Result<StateBuffer, HashmixError> {
    if seed.is_empty() {
        return Err(HashmixError::InvalidSeed(
            ErrorInfo::new("empty-seed", "seed must contain at least one byte")
                .with_hint("pass one or more hex bytes, e.g. 01,02,03"),
        ));
    }
    validate_buffer_size(buffer_size)?;

    let mut buffer = StateBuffer::zeroed(buffer_size);
    let state = buffer.as_bytes_mut();

    let mut offset = 0;
    while offset + buffer_size < seed.len() {
        xor_into(state, &seed[offset..offset + buffer_size]);
        offset += buffer_size;
    }

    if offset == 0 {
        xor_into(&mut state[..seed.len()], seed);
    } else {
        // offset only advances in whole windows, so no partial fold remains.
        debug!(
            "seed of {} bytes folded in {} windows, {} trailing bytes unused",
            seed.len(),
            offset / buffer_size,
            seed.len() - offset
        );
    }

    Ok(buffer)
}

fn xor_into(target: &mut [u8], source: &[u8]) {
    for (dst, src) in target.iter_mut().zip(source) {
        *dst ^= src;
    }
}
