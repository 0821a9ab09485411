// src/common/types.rs

use core::fmt;

use super::flags::{BaseUnit, DisplayFormat, Scale};

// --- Measurement Class ---

/// AC/DC qualifier carried by the first frame byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Coupling {
    /// Diode and resistance ranges: no qualifier.
    None,
    Dc,
    Ac,
}

impl Coupling {
    /// Maps the low nibble of frame byte 0 to a coupling.
    ///
    /// `1` and `3` are the diode/ohms sub-modes, `7` is DC and `0xb` is AC.
    pub fn from_class_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x1 | 0x3 => Some(Coupling::None),
            0x7 => Some(Coupling::Dc),
            0xb => Some(Coupling::Ac),
            _ => None,
        }
    }

    /// Canonical class nibble for this coupling (used when building frames).
    pub fn class_nibble(self) -> u8 {
        match self {
            Coupling::None => 0x3,
            Coupling::Dc => 0x7,
            Coupling::Ac => 0xb,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Coupling::None => "",
            Coupling::Dc => "DC ",
            Coupling::Ac => "AC ",
        }
    }
}

// --- Unit ---

/// A measurement unit with its AC/DC qualifier folded in.
///
/// Displays as `"DC Volt"`, `"AC Amp"`, `"Ohm"`, ... Two readings belong to the
/// same channel exactly when their units compare equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Unit {
    pub coupling: Coupling,
    pub base: BaseUnit,
}

impl Unit {
    pub const fn new(coupling: Coupling, base: BaseUnit) -> Self {
        Unit { coupling, base }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.coupling.prefix())?;
        f.write_str(self.base.name())
    }
}

// --- Reading ---

/// One fully decoded measurement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reading {
    /// Value in base units (volts, ohms, amps).
    pub value: f64,
    pub unit: Unit,
    /// Prefix shown on the meter when the reading was taken.
    pub scale: Scale,
    pub display: DisplayFormat,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display.write_value(f, self.value)?;
        write!(f, " {}", self.unit)
    }
}
