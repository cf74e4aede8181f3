//! Hex text to bytes.
//!
//! Frames are captured from the dongle as hex text. [`hex_decode`] keeps the
//! arithmetic the historical tooling used so old results can be reproduced
//! bit for bit; [`decode_strict`] rejects anything that is not a hex pair.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid hex digit {digit:#04x} at position {position}")]
    InvalidHexDigit { digit: u8, position: usize },

    #[error("Odd length input: {len} characters")]
    OddLengthInput { len: usize },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Unvalidated, historical arithmetic.
    Legacy,
    #[default]
    Strict,
}

// Anything at or above 'A' is treated as a letter digit. 'a'..='f' land on
// the right nibble anyway because 'a' - 'A' is a multiple of 16.
fn legacy_nibble(c: u8) -> u8 {
    if c >= b'A' {
        c.wrapping_sub(b'A').wrapping_add(10)
    } else {
        c.wrapping_sub(b'0')
    }
}

/// Decodes `char_count / 2` hex pairs from the front of `input`.
///
/// No validation: an odd trailing character is dropped and non-hex
/// characters produce meaningless nibbles. `char_count` is clamped to the
/// input length.
pub fn hex_decode(input: &[u8], char_count: usize) -> Vec<u8> {
    let len = char_count.min(input.len());
    input[..len]
        .chunks_exact(2)
        .map(|pair| {
            let hi = legacy_nibble(pair[0]);
            let lo = legacy_nibble(pair[1]);
            ((hi << 4) & 0xFF) | (lo & 0x0F)
        })
        .collect()
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

pub fn decode_strict(input: &[u8]) -> Result<Vec<u8>, HexError> {
    if input.len() % 2 != 0 {
        return Err(HexError::OddLengthInput { len: input.len() });
    }

    let digit = |position: usize| {
        let c = input[position];
        nibble(c).ok_or(HexError::InvalidHexDigit { digit: c, position })
    };

    (0..input.len())
        .step_by(2)
        .map(|i| -> Result<u8, HexError> { Ok((digit(i)? << 4) | digit(i + 1)?) })
        .collect()
}

pub fn decode(input: &[u8], mode: Mode) -> Result<Vec<u8>, HexError> {
    match mode {
        Mode::Legacy => Ok(hex_decode(input, input.len())),
        Mode::Strict => decode_strict(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pairs() {
        assert_eq!(hex_decode(b"4142", 4), vec![0x41, 0x42]);
        assert_eq!(decode_strict(b"4142").unwrap(), vec![0x41, 0x42]);
    }

    #[test]
    fn legacy_only_consumes_char_count() {
        assert_eq!(hex_decode(b"414243", 4), vec![0x41, 0x42]);
        assert_eq!(hex_decode(b"4142", 100), vec![0x41, 0x42]);
        assert!(hex_decode(b"4142", 0).is_empty());
    }

    #[test]
    fn legacy_drops_odd_trailing_character() {
        assert_eq!(hex_decode(b"41424", 5), vec![0x41, 0x42]);
    }

    #[test]
    fn legacy_lowercase_matches_uppercase() {
        assert_eq!(hex_decode(b"c6DFab", 6), vec![0xC6, 0xDF, 0xAB]);
        assert_eq!(hex_decode(b"c6df", 4), hex_decode(b"C6DF", 4));
    }

    #[test]
    fn legacy_accepts_garbage_silently() {
        // 'G' is one past 'F' and becomes nibble 16, which the mask folds to 0
        assert_eq!(hex_decode(b"1G", 2), vec![0x10]);
        assert_eq!(hex_decode(b"G1", 2), vec![0x01]);
    }

    #[test]
    fn strict_agrees_with_legacy_on_valid_input() {
        let input = b"820327442d2c5768663230028d20cb103407201d82040f26a7e808ff";
        assert_eq!(decode_strict(input).unwrap(), hex_decode(input, input.len()));
    }

    #[test]
    fn strict_rejects_odd_length() {
        assert_eq!(
            decode_strict(b"414"),
            Err(HexError::OddLengthInput { len: 3 })
        );
    }

    #[test]
    fn strict_rejects_invalid_digit() {
        assert_eq!(
            decode_strict(b"41G2"),
            Err(HexError::InvalidHexDigit { digit: b'G', position: 2 })
        );
        assert_eq!(
            decode_strict(b"4 42"),
            Err(HexError::InvalidHexDigit { digit: b' ', position: 1 })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            HexError::InvalidHexDigit { digit: b'G', position: 2 }.to_string(),
            "Invalid hex digit 0x47 at position 2"
        );
        assert_eq!(
            HexError::OddLengthInput { len: 3 }.to_string(),
            "Odd length input: 3 characters"
        );
    }

    #[test]
    fn empty_input() {
        assert!(hex_decode(b"", 0).is_empty());
        assert_eq!(decode_strict(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn mode_dispatch() {
        assert_eq!(decode(b"41424", Mode::Legacy).unwrap(), vec![0x41, 0x42]);
        assert!(decode(b"41424", Mode::Strict).is_err());
    }
}
