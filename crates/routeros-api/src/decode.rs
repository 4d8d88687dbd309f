//! Scalar decoders for textual reply fields.
//!
//! Reply attributes are free-form text. These decoders never fail outright:
//! integer and boolean fields fall back to `0` / `false`, and counter pairs
//! report a [`DecodeError`] that callers resolve to `0/0`.
//!
//! Parsing is strictly positional. Leading whitespace and sign characters are
//! not accepted. A digit run that overflows `u64` is a decode failure.

use serde::Serialize;

/// Separator between the receive and transmit halves of a counter field.
pub const COUNTER_SEPARATOR: u8 = b'/';

/// Error decoding a structured field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("field is missing")]
    Missing,

    #[error("expected digits at offset {offset} in {text:?}")]
    NoDigits { text: String, offset: usize },

    #[error("expected '/' at offset {offset} in {text:?}")]
    MissingSeparator { text: String, offset: usize },

    #[error("number at offset {offset} in {text:?} overflows 64 bits")]
    Overflow { text: String, offset: usize },
}

/// A receive/transmit counter pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CounterPair {
    pub rx: u64,
    pub tx: u64,
}

impl CounterPair {
    pub const fn new(rx: u64, tx: u64) -> Self {
        Self { rx, tx }
    }
}

/// Accumulates leading ASCII digits, returning the value and digit count.
///
/// The value is `None` when the digit run does not fit in a `u64`; the
/// whole run is still counted as consumed.
fn leading_digits(bytes: &[u8]) -> (Option<u64>, usize) {
    let mut value = Some(0u64);
    let mut consumed = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .and_then(|v| v.checked_mul(10))
            .and_then(|v| v.checked_add(u64::from(b - b'0')));
        consumed += 1;
    }
    (value, consumed)
}

/// Parses a base-10 unsigned integer from the start of `text`.
///
/// Returns `0` when the field is missing, does not start with a digit, or
/// overflows `u64`. Trailing content after the digits is ignored. Values
/// wider than 32 bits keep their low 32 bits.
pub fn parse_unsigned(text: Option<&str>) -> u32 {
    let Some(text) = text else {
        return 0;
    };
    match leading_digits(text.as_bytes()) {
        (Some(value), consumed) if consumed > 0 => value as u32,
        _ => 0,
    }
}

/// Returns true iff `text` equals `"true"`, ignoring ASCII case.
pub fn parse_bool(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.eq_ignore_ascii_case("true"))
}

/// Parses a `"<rx>/<tx>"` counter field.
pub fn parse_counter_pair(text: Option<&str>) -> Result<CounterPair, DecodeError> {
    let text = text.ok_or(DecodeError::Missing)?;
    let bytes = text.as_bytes();

    let (rx, rx_len) = leading_digits(bytes);
    if rx_len == 0 {
        return Err(DecodeError::NoDigits {
            text: text.to_string(),
            offset: 0,
        });
    }
    let rx = rx.ok_or_else(|| DecodeError::Overflow {
        text: text.to_string(),
        offset: 0,
    })?;

    if bytes.get(rx_len) != Some(&COUNTER_SEPARATOR) {
        return Err(DecodeError::MissingSeparator {
            text: text.to_string(),
            offset: rx_len,
        });
    }

    let tx_start = rx_len + 1;
    let (tx, tx_len) = leading_digits(&bytes[tx_start..]);
    if tx_len == 0 {
        return Err(DecodeError::NoDigits {
            text: text.to_string(),
            offset: tx_start,
        });
    }
    let tx = tx.ok_or_else(|| DecodeError::Overflow {
        text: text.to_string(),
        offset: tx_start,
    })?;

    Ok(CounterPair::new(rx, tx))
}

/// Parses a counter field, resolving any failure to `0/0`.
///
/// Absent fields are common and resolve silently.
pub fn counter_pair_or_zero(field: &str, text: Option<&str>) -> CounterPair {
    match parse_counter_pair(text) {
        Ok(pair) => pair,
        Err(DecodeError::Missing) => CounterPair::default(),
        Err(e) => {
            tracing::debug!(field, error = %e, "counter field unusable, using 0/0");
            CounterPair::default()
        }
    }
}
