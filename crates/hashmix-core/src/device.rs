//! The generator device: seed, state buffer and generator bank.

use log::{debug, trace};

use crate::absorb::absorb_seed;
use crate::bank::{GeneratorBank, Snapshot};
use crate::buffer::StateBuffer;
use crate::config::DeviceConfig;
use crate::derive::derive_parameters;
use crate::errors::HashmixError;
use crate::extract::{fill_words, next_word, to_unit_f64};
use crate::request::{Output, OutputKind, Request};
use crate::serialize::{render_output, render_state};

/// Deterministic random number device.
///
/// Construction absorbs the seed, derives all generator parameters and takes
/// the initial checkpoint. Every extraction mutates the current snapshot in
/// place, so a device must not be shared between independent consumers; use
/// one device per stream.
#[derive(Debug, Clone)]
pub struct Device {
    seed: Vec<u8>,
    config: DeviceConfig,
    buffer: StateBuffer,
    bank: GeneratorBank,
}

impl Device {
    /// Creates a device from seed bytes and a buffer size in bytes.
    pub fn new(seed: &[u8], buffer_size: usize) -> Result<Self, HashmixError> {
        Self::with_config(seed, DeviceConfig::with_buffer_size(buffer_size))
    }

    /// Creates a device from seed bytes and a configuration.
    pub fn with_config(seed: &[u8], config: DeviceConfig) -> Result<Self, HashmixError> {
        config.validate()?;
        let mut buffer = absorb_seed(seed, config.buffer_size)?;
        let snapshot = derive_parameters(&mut buffer);
        debug!(
            "device constructed: seed_len={}, buffer_size={}, lanes={}",
            seed.len(),
            config.buffer_size,
            snapshot.width()
        );
        Ok(Self {
            seed: seed.to_vec(),
            config,
            buffer,
            bank: GeneratorBank::new(snapshot),
        })
    }

    /// Seed material the device was built from.
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// Construction parameters.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// State buffer after parameter derivation.
    pub fn buffer(&self) -> &StateBuffer {
        &self.buffer
    }

    /// Current and previous snapshots.
    pub fn bank(&self) -> &GeneratorBank {
        &self.bank
    }

    /// Snapshot advanced by extraction.
    pub fn current(&self) -> &Snapshot {
        self.bank.current()
    }

    /// Number of lanes `W`.
    pub fn num_words(&self) -> usize {
        self.config.num_words()
    }

    /// Returns the next `amount` words of the stream.
    pub fn extract_uint64(&mut self, amount: usize) -> Vec<u64> {
        let mut out = vec![0; amount];
        self.fill_uint64(&mut out);
        out
    }

    /// Overwrites `out` with the next words of the stream.
    pub fn fill_uint64(&mut self, out: &mut [u64]) {
        if out.is_empty() {
            return;
        }
        fill_words(self.bank.current_mut(), out);
        let current = self.bank.current();
        trace!(
            "extracted {} words, idx_mult={}, idx_xor={}",
            out.len(),
            current.idx_mult,
            current.idx_xor
        );
    }

    /// Returns the next `amount` floats in `[0, 1)`.
    ///
    /// Consumes exactly the state that `extract_uint64(amount)` would.
    pub fn extract_float64(&mut self, amount: usize) -> Vec<f64> {
        self.extract_uint64(amount)
            .into_iter()
            .map(to_unit_f64)
            .collect()
    }

    /// Returns the next word.
    pub fn next_uint64(&mut self) -> u64 {
        next_word(self.bank.current_mut())
    }

    /// Returns the next float in `[0, 1)`.
    pub fn next_float64(&mut self) -> f64 {
        to_unit_f64(self.next_uint64())
    }

    /// Serves a request.
    pub fn extract(&mut self, request: Request) -> Output {
        match request.kind {
            OutputKind::U64 => Output::U64(self.extract_uint64(request.amount)),
            OutputKind::F64 => Output::F64(self.extract_float64(request.amount)),
        }
    }

    /// Copies the current snapshot into the checkpoint.
    pub fn checkpoint(&mut self) {
        self.bank.checkpoint();
    }

    /// Resets the current snapshot to the checkpoint.
    pub fn restore(&mut self) {
        self.bank.restore();
    }

    /// Installs a decoded snapshot as the checkpoint.
    ///
    /// The seed and buffer are left untouched; call [`Device::restore`] to
    /// resume the stream from the installed snapshot.
    pub fn load_checkpoint(&mut self, snapshot: Snapshot) -> Result<(), HashmixError> {
        self.bank.install_previous(snapshot)?;
        debug!("checkpoint loaded");
        Ok(())
    }

    /// Renders the state block of the dump format.
    pub fn render_state(&self) -> String {
        render_state(&self.buffer, self.bank.current())
    }

    /// Serves a request and renders its output line followed by the state block.
    pub fn extract_and_render(&mut self, request: Request) -> String {
        let output = self.extract(request);
        let mut text = render_output(&output);
        text.push_str(&self.render_state());
        text
    }
}
