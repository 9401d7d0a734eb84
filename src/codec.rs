//! Fixed-width base-N codec over the display-id alphabet.

use crate::display_id::DisplayIdError;

/// Ordered symbol table: digits `2`-`9` plus uppercase letters, with `O`,
/// `I` and `L` removed (and `0`/`1` never present). No remaining symbol is
/// visually confusable with another when printed or hand-typed.
pub const ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Radix of the codec; always the alphabet length.
pub const BASE: u64 = ALPHABET.len() as u64;

/// Numeric value of a symbol, if it is in the alphabet.
pub(crate) fn symbol_value(c: char) -> Option<u64> {
    ALPHABET
        .iter()
        .position(|&b| b as char == c)
        .map(|i| i as u64)
}

/// Encode `num` as exactly `length` symbols, most significant first.
///
/// Values outside `[0, BASE^length)` wrap modulo `BASE^length`; callers
/// pre-mask their inputs to stay in range.
pub fn encode(mut num: u64, length: usize) -> String {
    let mut out = vec![' '; length];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(num % BASE) as usize] as char;
        num /= BASE;
    }
    out.into_iter().collect()
}

/// Decode a string of alphabet symbols back into an integer.
///
/// A symbol outside the alphabet is a hard [`DisplayIdError::InvalidSymbol`]
/// rather than a silently corrupted value.
pub fn decode(s: &str) -> Result<u64, DisplayIdError> {
    let mut result: u64 = 0;
    for c in s.chars() {
        let value = symbol_value(c).ok_or(DisplayIdError::InvalidSymbol(c))?;
        result = result * BASE + value;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_confusable_symbols() {
        for c in ['0', 'O', 'I', '1', 'L'] {
            assert!(symbol_value(c).is_none(), "{c} must not be encodable");
        }
    }

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(encode(0, 4), "2222");
        assert_eq!(encode(BASE - 1, 1), "Z");
        assert_eq!(encode(BASE.pow(4) - 1, 4), "ZZZZ");
    }

    #[test]
    fn test_round_trip() {
        for value in [0, 1, BASE - 1, BASE, BASE + 1, 12345, BASE.pow(4) - 1] {
            let encoded = encode(value, 4);
            assert_eq!(encoded.len(), 4);
            assert_eq!(decode(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_encode_wraps_out_of_range_values() {
        assert_eq!(encode(BASE.pow(4) + 5, 4), encode(5, 4));
    }

    #[test]
    fn test_decode_rejects_unknown_symbols() {
        assert!(matches!(
            decode("2K!4"),
            Err(DisplayIdError::InvalidSymbol('!'))
        ));
        assert!(matches!(
            decode("ABC0"),
            Err(DisplayIdError::InvalidSymbol('0'))
        ));
        assert!(matches!(
            decode("abcd"),
            Err(DisplayIdError::InvalidSymbol('a'))
        ));
    }

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(decode("").unwrap(), 0);
    }
}
