#![deny(missing_docs)]
#![doc = "Deterministic hash-diffused random number engine. Dumps in the [`serialize`] format compare streams across implementations."]

pub mod absorb;
pub mod bank;
pub mod buffer;
pub mod config;
pub mod derive;
pub mod device;
pub mod diffuse;
pub mod errors;
pub mod extract;
pub mod request;
mod rng;
/// Checkpoint persistence in JSON and binary form.
pub mod serde;
pub mod serialize;

pub use bank::{GeneratorBank, ParityRule, Snapshot};
pub use buffer::StateBuffer;
pub use config::DeviceConfig;
pub use device::Device;
pub use errors::{ErrorInfo, HashmixError};
pub use extract::{to_unit_f64, FLOAT_MASK, FLOAT_SCALE};
pub use request::{parse_requests, Output, OutputKind, Request};
pub use crate::serde::{
    snapshot_from_bytes, snapshot_from_json, snapshot_to_bytes, snapshot_to_json,
};
pub use serialize::{render_output, render_state, DumpKey, FieldKind};

/// Size of one diffusion block in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Bytes per generator word.
pub const WORD_BYTES: usize = 8;

/// Buffer size used when none is given.
pub const DEFAULT_BUFFER_SIZE: usize = 128;
