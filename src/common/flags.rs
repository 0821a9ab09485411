// src/common/flags.rs

//! Unit and scale flags.
//!
//! The low nibbles of frame indices 9..=13 are written out as five hex
//! characters. The first two carry the scale prefix, the last three the base
//! unit:
//!
//! ```text
//! 0 0 0 4 1   Volt, no prefix
//! 0 8 0 4 1   millivolt
//! 0 0 4 0 1   Ohm
//! ```

use arrayvec::ArrayString;
use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::String;

use super::error::DecodeError;

/// Five hex characters assembled from the flag nibbles.
pub type FlagCode = ArrayString<5>;

/// Base unit of a measurement, before any AC/DC qualifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BaseUnit {
    Volt,
    Ohm,
    Amp,
}

impl BaseUnit {
    /// Three-character code as it appears in the flag string.
    pub fn code(self) -> &'static str {
        match self {
            BaseUnit::Volt => "041",
            BaseUnit::Ohm => "401",
            BaseUnit::Amp => "081",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseUnit::Volt => "Volt",
            BaseUnit::Ohm => "Ohm",
            BaseUnit::Amp => "Amp",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decimal prefix shown on the meter's display.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Scale {
    None,
    Milli,
    Micro,
    Kilo,
    Mega,
}

impl Scale {
    /// Two-character code as it appears in the flag string.
    pub fn code(self) -> &'static str {
        match self {
            Scale::None => "00",
            Scale::Milli => "08",
            Scale::Micro => "80",
            Scale::Kilo => "20",
            Scale::Mega => "02",
        }
    }

    /// Power of ten applied to the displayed number.
    pub fn exponent(self) -> i8 {
        match self {
            Scale::None => 0,
            Scale::Milli => -3,
            Scale::Micro => -6,
            Scale::Kilo => 3,
            Scale::Mega => 6,
        }
    }

    /// `10^exponent` as a float. A closed table keeps this usable without `std`.
    pub fn factor(self) -> f64 {
        match self {
            Scale::None => 1.0,
            Scale::Milli => 1e-3,
            Scale::Micro => 1e-6,
            Scale::Kilo => 1e3,
            Scale::Mega => 1e6,
        }
    }

    /// Recommended display format for values in base units.
    ///
    /// Smaller prefixes keep more decimal places so no displayed digit is lost.
    pub fn display_format(self) -> DisplayFormat {
        let precision = match self {
            Scale::None => 3,
            Scale::Milli => 6,
            Scale::Micro => 9,
            Scale::Kilo | Scale::Mega => 0,
        };
        DisplayFormat { precision }
    }
}

/// Fixed-point format for printing a value in base units.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DisplayFormat {
    /// Digits after the decimal point.
    pub precision: u8,
}

impl DisplayFormat {
    /// Writes `value` with this format into any `fmt::Write` sink.
    pub fn write_value<W: fmt::Write>(&self, out: &mut W, value: f64) -> fmt::Result {
        write!(out, "{:.*}", self.precision as usize, value)
    }

    #[cfg(feature = "alloc")]
    pub fn format(&self, value: f64) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_value(&mut out, value);
        out
    }
}

/// Splits a flag code into its scale prefix and base unit.
///
/// Only the literal codes in the tables above are accepted.
pub fn decode_flags(code: &str) -> Result<(BaseUnit, Scale), DecodeError> {
    let (prefix, suffix) = match (code.get(..2), code.get(2..)) {
        (Some(prefix), Some(suffix)) if code.len() == 5 => (prefix, suffix),
        _ => return Err(DecodeError::Unit(fixed(code))),
    };

    let scale = match prefix {
        "00" => Scale::None,
        "08" => Scale::Milli,
        "80" => Scale::Micro,
        "20" => Scale::Kilo,
        "02" => Scale::Mega,
        other => return Err(DecodeError::Scale(fixed(other))),
    };

    let unit = match suffix {
        "041" => BaseUnit::Volt,
        "401" => BaseUnit::Ohm,
        "081" => BaseUnit::Amp,
        other => return Err(DecodeError::Unit(fixed(other))),
    };

    Ok((unit, scale))
}

fn fixed<const N: usize>(s: &str) -> ArrayString<N> {
    let mut out = ArrayString::new();
    for c in s.chars().take(N) {
        if out.try_push(c).is_err() {
            break;
        }
    }
    out
}
