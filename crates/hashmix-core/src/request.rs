//! Output requests (`u64:<n>` / `f64:<n>`) and their results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HashmixError};

/// Kind of values a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Raw 64-bit words.
    U64,
    /// Doubles in `[0, 1)`.
    F64,
}

impl OutputKind {
    /// Short name used in request strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::U64 => "u64",
            OutputKind::F64 => "f64",
        }
    }
}

impl FromStr for OutputKind {
    type Err = HashmixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "u64" => Ok(OutputKind::U64),
            "f64" => Ok(OutputKind::F64),
            other => Err(HashmixError::InvalidArgument(
                ErrorInfo::new("unknown-output-kind", "output kind must be u64 or f64")
                    .with_context("kind", other),
            )),
        }
    }
}

/// A single extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Request {
    /// Kind of values to produce.
    pub kind: OutputKind,
    /// Number of values to produce.
    pub amount: usize,
}

impl Request {
    /// Builds a request from a signed count, rejecting negative values.
    pub fn new(kind: OutputKind, amount: i64) -> Result<Self, HashmixError> {
        let amount = checked_amount(amount)?;
        Ok(Self { kind, amount })
    }

    /// Request for `amount` raw words.
    pub fn u64(amount: usize) -> Self {
        Self {
            kind: OutputKind::U64,
            amount,
        }
    }

    /// Request for `amount` unit floats.
    pub fn f64(amount: usize) -> Self {
        Self {
            kind: OutputKind::F64,
            amount,
        }
    }
}

/// Converts a signed count into an amount, rejecting negative values.
pub fn checked_amount(amount: i64) -> Result<usize, HashmixError> {
    usize::try_from(amount).map_err(|_| {
        HashmixError::InvalidArgument(
            ErrorInfo::new("negative-amount", "output count must not be negative")
                .with_context("amount", amount),
        )
    })
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.amount)
    }
}

impl FromStr for Request {
    type Err = HashmixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            HashmixError::InvalidArgument(
                ErrorInfo::new("malformed-request", "request must look like <kind>:<count>")
                    .with_context("request", s)
                    .with_hint("e.g. u64:16 or f64:4"),
            )
        };
        let (kind, amount) = s.split_once(':').ok_or_else(malformed)?;
        let kind: OutputKind = kind.parse()?;
        let amount: i64 = amount.trim().parse().map_err(|_| malformed())?;
        Request::new(kind, amount)
    }
}

impl TryFrom<String> for Request {
    type Error = HashmixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Request> for String {
    fn from(request: Request) -> Self {
        request.to_string()
    }
}

/// Parses a comma separated request list such as `u64:4,f64:2`.
pub fn parse_requests(list: &str) -> Result<Vec<Request>, HashmixError> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Values produced for a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Raw words.
    U64(Vec<u64>),
    /// Unit floats.
    F64(Vec<f64>),
}

impl Output {
    /// Number of contained values.
    pub fn len(&self) -> usize {
        match self {
            Output::U64(values) => values.len(),
            Output::F64(values) => values.len(),
        }
    }

    /// Returns `true` when no values were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
