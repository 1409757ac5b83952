//! `rand` integration for [`Device`].

use rand::RngCore;

use crate::buffer::unpack_words;
use crate::device::Device;
use crate::WORD_BYTES;

/// The device is usable wherever `rand` expects a generator.
///
/// `next_u64` draws one word; `next_u32` keeps the low half of one word;
/// `fill_bytes` writes little-endian words and discards the unused tail of
/// the last one. Streams remain those of [`Device::next_uint64`].
impl RngCore for Device {
    fn next_u32(&mut self) -> u32 {
        self.next_uint64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_uint64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let words = self.extract_uint64(dest.len().div_ceil(WORD_BYTES));
        let bytes = unpack_words(&words);
        dest.copy_from_slice(&bytes[..dest.len()]);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
