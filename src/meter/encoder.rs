// src/meter/encoder.rs

use crate::common::{
    digit,
    flags::{BaseUnit, Scale},
    frame::{self, DIGIT_PAIRS, FRAME_LEN, MARKER_BIT},
    types::Coupling,
};

/// Why a display image could not be put into a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// The display has exactly four digit positions.
    #[error("expected 4 digits, found {0}")]
    DigitCount(usize),
    /// Decimal point before the first digit, after the last, or doubled.
    #[error("decimal point at position {0} cannot be shown")]
    MisplacedPoint(usize),
    #[error("unexpected character '{0}' in display image")]
    InvalidCharacter(char),
}

/// Builds the frame a meter would send while showing `image`.
///
/// `image` is what the display reads, e.g. `"05.48"`, `"-1.924"` or `"342.0"`:
/// an optional sign, four digits, and decimal points between digits.
pub fn encode(
    image: &str,
    coupling: Coupling,
    scale: Scale,
    base: BaseUnit,
) -> Result<[u8; FRAME_LEN], EncodeError> {
    let mut nibbles = [0u8; FRAME_LEN];
    nibbles[0] = coupling.class_nibble();

    let (negative, body) = match image.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, image),
    };

    let mut pair = 0;
    let mut point = false;
    for (pos, c) in body.char_indices() {
        match c {
            '.' => {
                if pair == 0 || point {
                    return Err(EncodeError::MisplacedPoint(pos));
                }
                point = true;
            }
            _ => {
                let code = digit::code_for(c).ok_or(EncodeError::InvalidCharacter(c))?;
                let (high, low) = *DIGIT_PAIRS.get(pair).ok_or(EncodeError::DigitCount(pair + 1))?;
                let marked = if pair == 0 { negative } else { point };
                nibbles[high] = (code >> 4) | if marked { MARKER_BIT } else { 0 };
                nibbles[low] = code & 0x0f;
                pair += 1;
                point = false;
            }
        }
    }
    if point {
        return Err(EncodeError::MisplacedPoint(body.len() - 1));
    }
    if pair != DIGIT_PAIRS.len() {
        return Err(EncodeError::DigitCount(pair));
    }

    let flags = scale.code().bytes().chain(base.code().bytes());
    for (index, c) in frame::FLAG_INDICES.zip(flags) {
        // Table codes are hex digits by construction
        nibbles[index] = (c as char).to_digit(16).unwrap_or(0) as u8;
    }

    let mut out = [0u8; FRAME_LEN];
    for (index, nibble) in nibbles.iter().enumerate() {
        out[index] = frame::frame_byte(index, *nibble);
    }
    Ok(out)
}
