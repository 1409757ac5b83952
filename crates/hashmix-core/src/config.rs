//! Construction parameters for a [`Device`](crate::Device).

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HashmixError};
use crate::{BLOCK_SIZE, DEFAULT_BUFFER_SIZE, WORD_BYTES};

/// Configurable parameters of a generator device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// State buffer size `N` in bytes; a positive multiple of the block size.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl DeviceConfig {
    /// Creates a configuration for the given buffer size.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Checks the buffer size against the block size.
    pub fn validate(&self) -> Result<(), HashmixError> {
        validate_buffer_size(self.buffer_size)
    }

    /// Word count `W = N / 8`.
    pub fn num_words(&self) -> usize {
        self.buffer_size / WORD_BYTES
    }
}

/// Rejects sizes that are zero or not a multiple of [`BLOCK_SIZE`].
pub fn validate_buffer_size(buffer_size: usize) -> Result<(), HashmixError> {
    if buffer_size == 0 || buffer_size % BLOCK_SIZE != 0 {
        let info = ErrorInfo::new(
            "buffer-size",
            "buffer size must be a positive multiple of the block size",
        )
        .with_context("buffer_size", buffer_size)
        .with_context("block_size", BLOCK_SIZE);
        return Err(HashmixError::InvalidConfig(info));
    }
    Ok(())
}
