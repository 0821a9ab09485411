// src/common/timing.rs

use core::time::Duration;

// The meter streams one 14-byte block roughly twice per second and then idles.
// Inter-byte spacing inside a block is one byte time; the idle gap between
// blocks is several hundred milliseconds. Silence, not a byte counter, delimits
// frames.

// === Line Settings ===

/// Serial line speed used by the meter's optical/USB adapter.
pub const BAUD_RATE: u32 = 2400;

/// Nominal duration of a single byte, 8N1 (10 bits on the wire). Approx 4.17 ms.
///
/// A silence gap at or below this would split every byte into its own frame.
pub const BYTE_DURATION: Duration = Duration::from_nanos(10 * 1_000_000_000 / BAUD_RATE as u64);

// === Framing ===

/// Inter-arrival gap above which the pending buffer is considered a complete frame.
///
/// Comfortably larger than `BYTE_DURATION` (bytes inside a block) and well below
/// the idle time between blocks.
pub const SILENCE_GAP: Duration = Duration::from_millis(100);

// === Polling ===

/// Upper bound on how long a single blocking read may wait for a byte.
/// Also bounds how long an interrupt request can go unnoticed.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Back-off between polls of a non-blocking read that returned `WouldBlock`.
pub const POLL_DELAY: Duration = Duration::from_micros(500);
