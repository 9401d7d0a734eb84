//! display-id: short, human-presentable, collision-resistant identifiers
//! for labeling business records (leads, quotes, orders).
//!
//! # Format
//!
//! ```text
//! DISPLAY-ID ::= TIME(4) RANDOM(4) CHECK(1)
//! ```
//!
//! Nine symbols over a reduced alphabet (digits `2`-`9` and uppercase
//! letters minus `O`, `I`, `L`) so that no symbol is confusable with
//! another when read aloud or hand-typed. The time component is the low
//! 20 bits of the mint-time Unix clock and wraps every ~12 days; the
//! checksum is a Luhn-style check symbol that catches typos, not
//! tampering.
//!
//! # Example
//!
//! ```
//! use display_id::{generate_display_id, validate_display_id};
//!
//! let id = generate_display_id();
//! assert_eq!(id.len(), 9);
//! assert!(validate_display_id(&id));  // e.g., "2KX4H9M7A"
//! ```
//!
//! Uniqueness against an external store is handled by the async helpers
//! ([`generate_unique_display_id`], [`generate_batch_display_ids`]),
//! which take the store's existence check as an opaque async collaborator.

mod async_api;
mod codec;
mod display_id;
mod format;

pub use async_api::{
    DEFAULT_MAX_ATTEMPTS, generate_batch_display_ids, generate_unique_display_id,
    generate_unique_display_id_with_attempts,
};
pub use codec::{ALPHABET, BASE, decode, encode};
pub use display_id::{
    DisplayIdError, ID_LEN, ParsedDisplayId, RANDOM_LEN, TIME_LEN, WINDOW_SECONDS, checksum,
    generate_display_id, parse_display_id, validate_display_id,
};
pub use format::{format_display_id, format_display_id_for_ui, unformat_display_id};
