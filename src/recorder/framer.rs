// src/recorder/framer.rs

use core::mem;
use core::time::Duration;

use tracing::trace;

use crate::common::{hal_traits::MeterInstant, timing, FRAME_LEN};

/// Bytes a candidate can hold before further bytes are only counted.
///
/// Large enough to keep a couple of run-together frames for diagnostics.
pub const MAX_CANDIDATE_LEN: usize = 64;

/// A silence-delimited run of bytes, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<I> {
    bytes: heapless::Vec<u8, MAX_CANDIDATE_LEN>,
    overflow: usize,
    /// Arrival time of the first byte.
    pub started_at: I,
    /// Arrival time of the last byte.
    pub ended_at: I,
}

impl<I> Candidate<I> {
    /// Buffered bytes, truncated to [`MAX_CANDIDATE_LEN`].
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total bytes received for this candidate, including dropped overflow.
    pub fn len(&self) -> usize {
        self.bytes.len() + self.overflow
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes received past capacity and dropped.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// True if the byte count matches a frame. Position checks are the decoder's job.
    pub fn has_frame_len(&self) -> bool {
        self.overflow == 0 && self.bytes.len() == FRAME_LEN
    }
}

/// Splits a timestamped byte stream into candidates on inter-byte silence.
///
/// A byte that arrives more than `silence_gap` after its predecessor closes
/// the pending buffer and starts a new one. The closed buffer is returned
/// whatever its length.
#[derive(Debug)]
pub struct SilenceFramer<I> {
    buffer: heapless::Vec<u8, MAX_CANDIDATE_LEN>,
    overflow: usize,
    started_at: Option<I>,
    last_arrival: Option<I>,
    silence_gap: Duration,
}

impl<I: MeterInstant> Default for SilenceFramer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeterInstant> SilenceFramer<I> {
    pub fn new() -> Self {
        Self::with_gap(timing::SILENCE_GAP)
    }

    pub fn with_gap(silence_gap: Duration) -> Self {
        SilenceFramer {
            buffer: heapless::Vec::new(),
            overflow: 0,
            started_at: None,
            last_arrival: None,
            silence_gap,
        }
    }

    pub fn silence_gap(&self) -> Duration {
        self.silence_gap
    }

    /// Bytes currently buffered (including overflow).
    pub fn pending(&self) -> usize {
        self.buffer.len() + self.overflow
    }

    /// Feeds one byte that arrived at `at`.
    ///
    /// Returns the previous buffer if the gap since the last byte exceeded
    /// the silence threshold.
    pub fn push(&mut self, byte: u8, at: I) -> Option<Candidate<I>> {
        let completed = match self.last_arrival {
            Some(previous) if at - previous > self.silence_gap => self.take(),
            _ => None,
        };

        if self.buffer.is_empty() && self.overflow == 0 {
            self.started_at = Some(at);
        }
        if self.buffer.push(byte).is_err() {
            self.overflow += 1;
        }
        self.last_arrival = Some(at);

        completed
    }

    /// Feeds a chunk of bytes that arrived together.
    ///
    /// Only the first byte of a chunk can follow a gap, so at most one
    /// candidate is completed per call.
    pub fn push_chunk(&mut self, bytes: &[u8], at: I) -> Option<Candidate<I>> {
        let mut completed = None;
        for &byte in bytes {
            if let Some(candidate) = self.push(byte, at) {
                completed = Some(candidate);
            }
        }
        completed
    }

    /// Closes the pending buffer if the line has been silent long enough by `now`.
    ///
    /// Lets a caller flush the last frame after a read timeout instead of
    /// waiting for the next byte.
    pub fn poll_idle(&mut self, now: I) -> Option<Candidate<I>> {
        match self.last_arrival {
            Some(previous) if now - previous > self.silence_gap => self.take(),
            _ => None,
        }
    }

    /// Closes the pending buffer unconditionally (end of stream).
    pub fn finish(&mut self) -> Option<Candidate<I>> {
        self.take()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflow = 0;
        self.started_at = None;
        self.last_arrival = None;
    }

    fn take(&mut self) -> Option<Candidate<I>> {
        if self.buffer.is_empty() && self.overflow == 0 {
            return None;
        }
        let started_at = self.started_at.take()?;
        let ended_at = self.last_arrival.unwrap_or(started_at);

        let candidate = Candidate {
            bytes: mem::take(&mut self.buffer),
            overflow: mem::take(&mut self.overflow),
            started_at,
            ended_at,
        };
        trace!(len = candidate.len(), overflow = candidate.overflow, "candidate framed");
        Some(candidate)
    }
}
