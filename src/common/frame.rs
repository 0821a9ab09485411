// src/common/frame.rs

//! Layout of a 14-byte meter frame.
//!
//! ```text
//! index   0     1..=8                9..=13
//!         class four digit pairs     flag nibbles
//! ```
//!
//! Every byte carries its own position in the high nibble (`index + 1`) and
//! payload in the low nibble.

use core::fmt;
use core::ops::RangeInclusive;

/// Bytes in one frame.
pub const FRAME_LEN: usize = 14;

/// (marker nibble, low nibble) index pairs, most significant digit first.
pub const DIGIT_PAIRS: [(usize, usize); 4] = [(1, 2), (3, 4), (5, 6), (7, 8)];

/// Indices whose low nibbles form the flag code.
pub const FLAG_INDICES: RangeInclusive<usize> = 9..=13;

/// Bit in a digit pair's first nibble that marks a sign (pair 1) or decimal point (pairs 2..4).
pub const MARKER_BIT: u8 = 0x08;

/// Position a byte claims for itself, if any.
pub fn position_of(byte: u8) -> Option<usize> {
    (byte >> 4).checked_sub(1).map(usize::from)
}

/// Payload nibble of a frame byte.
pub fn payload(byte: u8) -> u8 {
    byte & 0x0f
}

/// Builds the frame byte for `index` carrying `nibble`.
pub fn frame_byte(index: usize, nibble: u8) -> u8 {
    (((index as u8) + 1) << 4) | (nibble & 0x0f)
}

/// Renders raw bytes as space-separated hex for diagnostics.
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
