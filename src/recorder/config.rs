// src/recorder/config.rs

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::timing;

/// What to do with a reading whose unit differs from the session's channel unit.
///
/// This happens when the meter's range switch is turned mid-session.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPolicy {
    /// Show it live, leave it out of the dataset.
    #[default]
    Drop,
    /// Persist it anyway.
    Keep,
}

/// Tunables for a recording session. Every field has a default, so a config
/// file only needs the keys it changes.
///
/// ```toml
/// silence_gap_ms = 100
/// read_timeout_ms = 1000
/// unit_policy = "drop"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Silence that closes a frame, in milliseconds.
    pub silence_gap_ms: u64,
    /// Longest a single read may block, in milliseconds.
    pub read_timeout_ms: u64,
    /// Back-off between polls of a read that would block, in microseconds.
    pub poll_delay_us: u32,
    pub unit_policy: UnitPolicy,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        RecorderConfig {
            silence_gap_ms: timing::SILENCE_GAP.as_millis() as u64,
            read_timeout_ms: timing::READ_TIMEOUT.as_millis() as u64,
            poll_delay_us: timing::POLL_DELAY.as_micros() as u32,
            unit_policy: UnitPolicy::Drop,
        }
    }
}

/// A config value the recorder cannot run with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidConfig {
    /// Bytes inside one frame are a byte time apart, so the gap must be longer.
    #[error("silence gap of {0} ms does not exceed one byte time")]
    SilenceGapTooShort(u64),
    #[error("read timeout must be nonzero")]
    ZeroReadTimeout,
}

impl RecorderConfig {
    /// Rejects values that would make every byte its own frame or spin the read loop.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.silence_gap() <= timing::BYTE_DURATION {
            return Err(InvalidConfig::SilenceGapTooShort(self.silence_gap_ms));
        }
        if self.read_timeout_ms == 0 {
            return Err(InvalidConfig::ZeroReadTimeout);
        }
        Ok(())
    }

    pub fn silence_gap(&self) -> Duration {
        Duration::from_millis(self.silence_gap_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
