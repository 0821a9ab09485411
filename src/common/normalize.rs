// src/common/normalize.rs

use core::fmt;

/// A digit image with redundant leading zeros and negative-zero signs removed.
///
/// Borrows from the input; use `Display` (or [`Normalized::write_to`]) to render it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Normalized<'a> {
    negative: bool,
    magnitude: &'a str,
}

impl<'a> Normalized<'a> {
    /// True when the value carries a minus sign after normalization.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The unsigned part, e.g. `"5.48"`.
    pub fn magnitude(&self) -> &'a str {
        self.magnitude
    }

    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        if self.negative {
            out.write_char('-')?;
        }
        out.write_str(self.magnitude)
    }
}

impl fmt::Display for Normalized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Strips the sign, drops leading `'0'`s that are followed by another digit,
/// and puts the sign back only if a nonzero digit remains.
///
/// `"-005.48"` becomes `"-5.48"`, `"000.0"` becomes `"0.0"`, `"-0.000"` becomes `"0.000"`.
pub fn normalize(image: &str) -> Normalized<'_> {
    let (signed, unsigned) = match image.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, image),
    };

    let bytes = unsigned.as_bytes();
    let mut start = 0;
    while start + 1 < bytes.len() && bytes[start] == b'0' && bytes[start + 1].is_ascii_digit() {
        start += 1;
    }
    let magnitude = &unsigned[start..];

    let nonzero = magnitude.bytes().any(|b| matches!(b, b'1'..=b'9'));
    Normalized { negative: signed && nonzero, magnitude }
}
