use serde::{Deserialize, Serialize};

use crate::bank::Snapshot;
use crate::errors::{ErrorInfo, HashmixError};

/// Version tag written into persisted checkpoints.
pub const CHECKPOINT_SCHEMA: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SerializableCheckpoint {
    schema: u32,
    snapshot: Snapshot,
}

fn unpack(payload: SerializableCheckpoint) -> Result<Snapshot, HashmixError> {
    if payload.schema != CHECKPOINT_SCHEMA {
        let info = ErrorInfo::new("checkpoint-schema", "unsupported checkpoint schema")
            .with_context("expected", CHECKPOINT_SCHEMA)
            .with_context("actual", payload.schema);
        return Err(HashmixError::FormatMismatch(info));
    }
    payload.snapshot.validate()?;
    Ok(payload.snapshot)
}

/// Serializes a snapshot to a JSON string.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String, HashmixError> {
    let payload = SerializableCheckpoint {
        schema: CHECKPOINT_SCHEMA,
        snapshot: snapshot.clone(),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| HashmixError::FormatMismatch(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores and validates a snapshot from a JSON string.
pub fn snapshot_from_json(data: &str) -> Result<Snapshot, HashmixError> {
    let payload: SerializableCheckpoint = serde_json::from_str(data).map_err(|err| {
        HashmixError::FormatMismatch(ErrorInfo::new("json-deserialize", err.to_string()))
    })?;
    unpack(payload)
}

/// Serializes a snapshot into a binary blob.
pub fn snapshot_to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, HashmixError> {
    let payload = SerializableCheckpoint {
        schema: CHECKPOINT_SCHEMA,
        snapshot: snapshot.clone(),
    };
    bincode::serialize(&payload).map_err(|err| {
        HashmixError::FormatMismatch(ErrorInfo::new("bincode-serialize", err.to_string()))
    })
}

/// Restores and validates a snapshot from a binary blob.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<Snapshot, HashmixError> {
    let payload: SerializableCheckpoint = bincode::deserialize(bytes).map_err(|err| {
        HashmixError::FormatMismatch(ErrorInfo::new("bincode-deserialize", err.to_string()))
    })?;
    unpack(payload)
}
