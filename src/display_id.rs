//! Display-id generation, validation and parsing.
//!
//! Format: 9 symbols — a 4-symbol time-window component, a 4-symbol random
//! component, and one checksum symbol, all over the reduced alphabet in
//! [`crate::codec`].

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rand::random_range;
use regex::Regex;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::codec::{self, ALPHABET, BASE};

/// Errors that can occur during display-id operations.
#[derive(Error, Debug)]
pub enum DisplayIdError {
    #[error("symbol '{0}' is not in the display-id alphabet")]
    InvalidSymbol(char),
    #[error("expected {expected} symbols, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("checksum mismatch: expected '{expected}', got '{actual}'")]
    ChecksumMismatch { expected: char, actual: char },
    #[error("failed to generate a unique display id after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Length of the time-window component, in symbols.
pub const TIME_LEN: usize = 4;
/// Length of the random component, in symbols.
pub const RANDOM_LEN: usize = 4;
/// Total id length: payload plus one checksum symbol.
pub const ID_LEN: usize = TIME_LEN + RANDOM_LEN + 1;

/// Seconds before the embedded time component repeats (~12 days).
pub const WINDOW_SECONDS: i64 = 1 << 20;

const TIME_MASK: i64 = WINDOW_SECONDS - 1;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[2-9A-HJKMNP-Z]{9}$").unwrap());

/// Parsed display-id components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedDisplayId {
    pub raw: String,
    /// Low bits of the mint-time Unix clock, as embedded in the id.
    pub window_offset: u32,
    /// Value of the random component.
    pub random: u32,
    /// Approximate mint time. See the aliasing caveat on [`parse_display_id`].
    pub timestamp: DateTime<Utc>,
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn time_component(now: i64) -> String {
    codec::encode((now & TIME_MASK) as u64, TIME_LEN)
}

fn random_component() -> String {
    codec::encode(random_range(0..BASE.pow(RANDOM_LEN as u32)), RANDOM_LEN)
}

/// Checksum symbol for an 8-symbol payload.
///
/// Luhn-style over the codec radix: symbol values at even positions are
/// doubled, products at or above the radix fold by adding their base-N
/// digits, and the check value complements the running sum to a multiple
/// of the radix. A typo-detection aid, not a cryptographic check.
pub fn checksum(payload: &str) -> Result<char, DisplayIdError> {
    let mut sum: u64 = 0;
    for (i, c) in payload.chars().enumerate() {
        let value = codec::symbol_value(c).ok_or(DisplayIdError::InvalidSymbol(c))?;
        let mut product = if i % 2 == 0 { value * 2 } else { value };
        if product >= BASE {
            product = product / BASE + product % BASE;
        }
        sum += product;
    }
    let check = ((BASE - sum % BASE) % BASE) as usize;
    Ok(ALPHABET[check] as char)
}

/// Generate a fresh 9-symbol display id.
///
/// Always succeeds. Uniqueness against a store is the caller's concern;
/// see [`crate::generate_unique_display_id`].
pub fn generate_display_id() -> String {
    let mut id = String::with_capacity(ID_LEN);
    id.push_str(&time_component(unix_now()));
    id.push_str(&random_component());
    let check = checksum(&id).expect("components are alphabet-only");
    id.push(check);
    id
}

/// Validate a candidate display id: length, charset, checksum.
///
/// Never errors; any malformed input is simply `false`.
pub fn validate_display_id(id: &str) -> bool {
    if !ID_PATTERN.is_match(id) {
        return false;
    }
    match checksum(&id[..ID_LEN - 1]) {
        Ok(expected) => id.as_bytes()[ID_LEN - 1] as char == expected,
        Err(_) => false,
    }
}

/// Recover the components and approximate mint time of a valid display id.
///
/// The embedded timestamp is only the low 20 bits of the mint-time Unix
/// clock, so the reconstruction aliases every [`WINDOW_SECONDS`]
/// (~12 days): an id older than about half a window is reported one or
/// more whole windows too late. Treat the result as "roughly which
/// multi-day window", never as an authoritative clock.
pub fn parse_display_id(id: &str) -> Result<ParsedDisplayId, DisplayIdError> {
    let len = id.chars().count();
    if len != ID_LEN {
        return Err(DisplayIdError::InvalidLength {
            expected: ID_LEN,
            actual: len,
        });
    }
    if let Some(c) = id.chars().find(|&c| codec::symbol_value(c).is_none()) {
        return Err(DisplayIdError::InvalidSymbol(c));
    }

    let expected = checksum(&id[..ID_LEN - 1])?;
    let actual = id.as_bytes()[ID_LEN - 1] as char;
    if actual != expected {
        return Err(DisplayIdError::ChecksumMismatch { expected, actual });
    }

    let window_offset = codec::decode(&id[..TIME_LEN])? as i64;
    let random = codec::decode(&id[TIME_LEN..TIME_LEN + RANDOM_LEN])? as u32;

    // Substitute the embedded low bits into the current clock; a future
    // estimate means the id came from the previous window.
    let now = unix_now();
    let mut estimated = now - (now & TIME_MASK) + window_offset;
    if estimated > now {
        estimated -= WINDOW_SECONDS;
    }

    Ok(ParsedDisplayId {
        raw: id.to_string(),
        window_offset: window_offset as u32,
        random,
        timestamp: Utc.timestamp_opt(estimated, 0).unwrap(),
    })
}
