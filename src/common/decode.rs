// src/common/decode.rs

use arrayvec::ArrayString;

use super::{
    digit,
    error::DecodeError,
    flags::{decode_flags, FlagCode},
    frame::{self, DIGIT_PAIRS, FLAG_INDICES, FRAME_LEN, MARKER_BIT},
    normalize::normalize,
    types::{Coupling, Reading, Unit},
};

/// Assembled sign/digit/decimal characters, at most `-` + 4 digits + 3 points.
pub type DigitImage = ArrayString<8>;

/// Validates one candidate buffer and decodes it into a [`Reading`].
///
/// Accepts a slice of any length and never panics; anything that is not a
/// well-formed frame comes back as a [`DecodeError`].
///
/// # Example
///
/// ```ignore
/// // "05.48" DC Volt, as captured from the meter
/// let frame = [
///     0x17, 0x27, 0x3d, 0x43, 0x5e, 0x6a, 0x77, 0x87, 0x9f, 0xa0, 0xb0, 0xc0, 0xd4, 0xe1,
/// ];
/// let reading = decode(&frame)?;
/// assert_eq!(reading.value, 5.48);
/// ```
pub fn decode(frame: &[u8]) -> Result<Reading, DecodeError> {
    let frame = check_layout(frame)?;

    let class = frame::payload(frame[0]);
    let coupling = Coupling::from_class_nibble(class).ok_or(DecodeError::Class(class))?;

    let image = digit_image(frame)?;
    let flags = flag_code(frame);
    let (base, scale) = decode_flags(&flags)?;

    let number = parse_image(&image)?;

    Ok(Reading {
        value: number * scale.factor(),
        unit: Unit::new(coupling, base),
        scale,
        display: scale.display_format(),
    })
}

/// Checks length and the per-byte position nibbles.
fn check_layout(buffer: &[u8]) -> Result<&[u8; FRAME_LEN], DecodeError> {
    let frame: &[u8; FRAME_LEN] = buffer.try_into().map_err(|_| DecodeError::Length {
        got: buffer.len(),
        expected: FRAME_LEN,
    })?;

    for (index, &byte) in frame.iter().enumerate() {
        if frame::position_of(byte) != Some(index) {
            return Err(DecodeError::Position { index, byte });
        }
    }
    Ok(frame)
}

/// Builds the digit image, e.g. `"-05.48"`, from the four digit pairs.
pub fn digit_image(frame: &[u8; FRAME_LEN]) -> Result<DigitImage, DecodeError> {
    let mut image = DigitImage::new();

    for (pair, &(high, low)) in DIGIT_PAIRS.iter().enumerate() {
        let mut marker = frame::payload(frame[high]);
        if marker & MARKER_BIT != 0 {
            // First pair marks the sign, later pairs a decimal point before the digit
            push(&mut image, if pair == 0 { '-' } else { '.' });
            marker &= !MARKER_BIT;
        }

        let code = marker * 16 + frame::payload(frame[low]);
        let digit =
            digit::lookup(code).map_err(|cause| DecodeError::Digit { index: high, cause })?;
        push(&mut image, digit);
    }

    Ok(image)
}

/// Hex string of the flag nibbles, e.g. `"08041"`.
pub fn flag_code(frame: &[u8; FRAME_LEN]) -> FlagCode {
    let mut code = FlagCode::new();
    for index in FLAG_INDICES {
        let nibble = frame::payload(frame[index]);
        if let Some(c) = char::from_digit(u32::from(nibble), 16) {
            // Five indices, five slots
            let _ = code.try_push(c);
        }
    }
    code
}

fn push(image: &mut DigitImage, c: char) {
    // Capacity covers the worst case of four pairs with every marker set
    let _ = image.try_push(c);
}

fn parse_image(image: &DigitImage) -> Result<f64, DecodeError> {
    let normalized = normalize(image);
    let mut text = DigitImage::new();
    normalized
        .write_to(&mut text)
        .map_err(|_| DecodeError::Number(*image))?;
    text.parse::<f64>().map_err(|_| DecodeError::Number(*image))
}
