// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A monotonic point in time, as produced by [`MeterTimer::now`].
///
/// Only differences between instants are meaningful. Subtraction must saturate
/// at zero rather than panic if the clock is observed out of order.
pub trait MeterInstant:
    Copy + Ord + Debug + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> MeterInstant for T where
    T: Copy + Ord + Debug + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the clock and delay operations the recorder needs.
pub trait MeterTimer {
    /// Timestamp type returned by [`now`](Self::now).
    type Instant: MeterInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the receive side of the meter's serial link.
///
/// The meter never listens, so there is no write path.
pub trait MeterSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}
