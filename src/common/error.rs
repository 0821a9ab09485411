// src/common/error.rs

use arrayvec::ArrayString;

/// Why a candidate buffer did not yield a [`Reading`](super::types::Reading).
///
/// Every variant is recoverable: the frame is dropped and the stream goes on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Buffer is not exactly one frame long.
    #[error("frame length {got}, expected {expected}")]
    Length { got: usize, expected: usize },

    /// High nibble of a byte does not match its position in the frame.
    #[error("byte {byte:#04x} at index {index} is out of position")]
    Position { index: usize, byte: u8 },

    /// Low nibble of the first byte is not a known measurement class.
    #[error("unknown class nibble {0:#x}")]
    Class(u8),

    /// A digit pair did not resolve to a decimal digit.
    #[error("digit pair at index {index}: {cause}")]
    Digit { index: usize, cause: DigitError },

    /// Scale prefix of the flag code is not in the table.
    #[error("unknown scale prefix \"{0}\"")]
    Scale(ArrayString<2>),

    /// Base-unit suffix of the flag code is not in the table.
    #[error("unknown unit code \"{0}\"")]
    Unit(ArrayString<3>),

    /// Digit image is not a decimal number (e.g. more than one decimal point).
    #[error("digit image \"{0}\" is not a number")]
    Number(ArrayString<8>),
}

/// Failure modes of the 7-segment digit table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DigitError {
    /// All segments off.
    #[error("blank digit")]
    Blank,
    /// The "L" glyph the meter shows when the input is out of range.
    #[error("over-range")]
    OverRange,
    /// Any other segment pattern.
    #[error("unknown segment code {0:#04x}")]
    Unknown(u8),
}

/// Errors that end (or prevent) a recording session.
#[derive(Debug, thiserror::Error)]
pub enum MeterError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No byte arrived within the read timeout.
    #[error("Operation timed out")]
    Timeout,
}

// Allow mapping from the underlying serial error
impl<E: core::fmt::Debug> From<E> for MeterError<E> {
    fn from(e: E) -> Self {
        MeterError::Io(e)
    }
}
