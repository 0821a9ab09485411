// src/common/digit.rs

//! 7-segment digit table.
//!
//! A digit occupies two frame bytes. After the sign/decimal bit has been
//! removed, the two low nibbles form a 7-bit segment code.

use super::error::DigitError;

/// Segment code with every segment off.
pub const BLANK: u8 = 0x00;
/// Segment code for the "L" glyph shown on over-range.
pub const OVER_RANGE: u8 = 0x68;

/// The closed set of segment codes that represent decimal digits, indexed by value.
pub const DIGIT_CODES: [u8; 10] = [0x7d, 0x05, 0x5b, 0x1f, 0x27, 0x3e, 0x7e, 0x15, 0x7f, 0x3f];

/// Maps a 7-bit segment code to its decimal character.
pub fn lookup(code: u8) -> Result<char, DigitError> {
    match code {
        0x7d => Ok('0'),
        0x05 => Ok('1'),
        0x5b => Ok('2'),
        0x1f => Ok('3'),
        0x27 => Ok('4'),
        0x3e => Ok('5'),
        0x7e => Ok('6'),
        0x15 => Ok('7'),
        0x7f => Ok('8'),
        0x3f => Ok('9'),
        BLANK => Err(DigitError::Blank),
        OVER_RANGE => Err(DigitError::OverRange),
        other => Err(DigitError::Unknown(other)),
    }
}

/// Inverse of [`lookup`], used when building frames.
pub fn code_for(digit: char) -> Option<u8> {
    digit.to_digit(10).map(|d| DIGIT_CODES[d as usize])
}
