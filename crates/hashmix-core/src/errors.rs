//! Structured error types shared across hashmix crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HashmixError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (sizes, line numbers, file names).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Dump location from the `file` and `line` context entries, if any.
    pub fn location(&self) -> Option<String> {
        let file = self.context.get("file");
        let line = self.context.get("line");
        match (file, line) {
            (Some(file), Some(line)) => Some(format!("{file}:{line}")),
            (Some(file), None) => Some(file.clone()),
            (None, Some(line)) => Some(format!("line {line}")),
            (None, None) => None,
        }
    }
}

/// Canonical error type for the hashmix engine and its tooling.
///
/// Every variant is fatal to the operation that produced it. The generator is
/// deterministic, so retrying with the same inputs yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail")]
pub enum HashmixError {
    /// Seed material was rejected (empty or not decodable).
    #[error("invalid seed: {0}")]
    InvalidSeed(ErrorInfo),
    /// Device configuration was rejected (buffer size, snapshot width).
    #[error("invalid config: {0}")]
    InvalidConfig(ErrorInfo),
    /// A request was malformed (negative count, unknown output kind).
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// A dump could not be parsed or its layout differs from its peer.
    #[error("format mismatch: {0}")]
    FormatMismatch(ErrorInfo),
    /// Two dumps disagree on values beyond the allowed tolerance.
    #[error("consistency mismatch: {0}")]
    ConsistencyMismatch(ErrorInfo),
}

/// Renders `[code] message at file:line (key=value, ...); hint: text`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " at {location}")?;
        }
        let rest: Vec<String> = self
            .context
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "file" | "line"))
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if !rest.is_empty() {
            write!(f, " ({})", rest.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl HashmixError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HashmixError::InvalidSeed(info)
            | HashmixError::InvalidConfig(info)
            | HashmixError::InvalidArgument(info)
            | HashmixError::FormatMismatch(info)
            | HashmixError::ConsistencyMismatch(info) => info,
        }
    }

    /// Returns the stable machine readable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry, keeping the variant.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let info = match &mut self {
            HashmixError::InvalidSeed(info)
            | HashmixError::InvalidConfig(info)
            | HashmixError::InvalidArgument(info)
            | HashmixError::FormatMismatch(info)
            | HashmixError::ConsistencyMismatch(info) => info,
        };
        info.context.insert(key.into(), value.to_string());
        self
    }
}
