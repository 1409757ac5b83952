//! Parsing of `key:value` dumps back into typed records.

use std::fmt;
use std::num::ParseIntError;

use hashmix_core::serialize::{format_bytes, format_words, FLOAT_DIGITS};
use hashmix_core::{DumpKey, ErrorInfo, FieldKind, HashmixError};
use serde::{Deserialize, Serialize};

const FIXED_SCALE: i128 = 10_i128.pow(FLOAT_DIGITS as u32);

/// Decimal with exactly [`FLOAT_DIGITS`] fractional digits, stored as an
/// integer count of `10^-16` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fixed(
    /// Count of `10^-16` units.
    pub i128,
);

impl Fixed {
    /// Parses `[-]<digits>.<16 digits>` in the form [`Display`](fmt::Display) writes.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = body.split_once('.')?;
        if !is_canonical_decimal(whole)
            || frac.len() != FLOAT_DIGITS
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let whole: i128 = whole.parse().ok()?;
        let frac: i128 = frac.parse().ok()?;
        let units = whole.checked_mul(FIXED_SCALE)?.checked_add(frac)?;
        // `-0.0…0` would render without its sign
        if negative && units == 0 {
            return None;
        }
        Some(Fixed(if negative { -units } else { units }))
    }

    /// Absolute distance in units.
    pub fn distance(self, other: Fixed) -> u128 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let units = self.0.unsigned_abs();
        let scale = FIXED_SCALE as u128;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            units / scale,
            units % scale,
            width = FLOAT_DIGITS
        )
    }
}

/// Typed value part of a dump line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Fields {
    /// Buffer bytes.
    Bytes(Vec<u8>),
    /// Generator words or `v_vec_u64` outputs.
    Words(Vec<u64>),
    /// A cursor value.
    Cursor(u64),
    /// `v_vec_f64` outputs.
    Floats(Vec<Fixed>),
}

impl Fields {
    /// Number of comma separated fields on the line.
    pub fn len(&self) -> usize {
        match self {
            Fields::Bytes(values) => values.len(),
            Fields::Words(values) => values.len(),
            Fields::Cursor(_) => 1,
            Fields::Floats(values) => values.len(),
        }
    }

    /// Returns `true` for an empty vector line.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render(&self) -> String {
        match self {
            Fields::Bytes(values) => format_bytes(values),
            Fields::Words(values) => format_words(values),
            Fields::Cursor(value) => value.to_string(),
            Fields::Floats(values) => values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Line key.
    pub key: DumpKey,
    /// Parsed values.
    pub fields: Fields,
}

/// A parsed dump.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dump {
    /// Records in file order.
    pub records: Vec<Record>,
}

impl Dump {
    /// Number of lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the dump has no lines.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders the dump back to text, one `\n`-terminated line per record.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(record.key.as_str());
            out.push(':');
            out.push_str(&record.fields.render());
            out.push('\n');
        }
        out
    }
}

fn format_error(line: usize, code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message).with_context("line", line)
}

/// Parses dump text. Trailing newlines are ignored.
pub fn parse_dump(text: &str) -> Result<Dump, HashmixError> {
    let body = text.trim_end_matches('\n');
    if body.is_empty() {
        return Ok(Dump::default());
    }
    let records = body
        .split('\n')
        .enumerate()
        .map(|(index, line)| parse_line(index + 1, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dump { records })
}

fn parse_line(line: usize, text: &str) -> Result<Record, HashmixError> {
    let malformed = || {
        HashmixError::FormatMismatch(
            format_error(line, "dump-line", "line must contain exactly one ':'")
                .with_context("text", text),
        )
    };
    let (name, value) = text.split_once(':').ok_or_else(malformed)?;
    if value.contains(':') {
        return Err(malformed());
    }
    let key = DumpKey::from_name(name).ok_or_else(|| {
        HashmixError::FormatMismatch(
            format_error(line, "dump-key", "unknown dump key").with_context("key", name),
        )
    })?;
    let fields = parse_fields(key, value).map_err(|field| {
        HashmixError::FormatMismatch(
            format_error(line, "dump-field", "field does not match the key encoding")
                .with_context("key", key)
                .with_context("field", field),
        )
    })?;
    Ok(Record { line, key, fields })
}

fn split_fields(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(move |_| !value.is_empty())
}

/// Digits only, no sign, no leading zero unless the value is `0`.
fn is_canonical_decimal(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'))
}

type RadixParser<T> = fn(&str, u32) -> Result<T, ParseIntError>;

fn parse_hex<T>(field: &str, digits: usize, convert: RadixParser<T>) -> Result<T, String> {
    let upper_hex = |b: u8| b.is_ascii_digit() || (b'A'..=b'F').contains(&b);
    if field.len() != digits || !field.bytes().all(upper_hex) {
        return Err(field.to_string());
    }
    convert(field, 16).map_err(|_| field.to_string())
}

fn parse_fields(key: DumpKey, value: &str) -> Result<Fields, String> {
    match key.field_kind() {
        FieldKind::Byte => split_fields(value)
            .map(|field| parse_hex(field, 2, u8::from_str_radix))
            .collect::<Result<_, _>>()
            .map(Fields::Bytes),
        FieldKind::Word => split_fields(value)
            .map(|field| parse_hex(field, 16, u64::from_str_radix))
            .collect::<Result<_, _>>()
            .map(Fields::Words),
        FieldKind::Cursor => {
            if !is_canonical_decimal(value) {
                return Err(value.to_string());
            }
            value
                .parse()
                .map(Fields::Cursor)
                .map_err(|_| value.to_string())
        }
        FieldKind::Fixed => split_fields(value)
            .map(|field| Fixed::parse(field).ok_or_else(|| field.to_string()))
            .collect::<Result<_, _>>()
            .map(Fields::Floats),
    }
}
