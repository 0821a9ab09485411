// src/recorder/mock.rs

//! Scripted serial line and clock shared by the recorder tests.

extern crate std;

use core::time::Duration;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::common::hal_traits::{MeterSerial, MeterTimer};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64); // microseconds

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockCommError {
    /// Script asked for a failure at this point.
    Injected,
    /// Script ran out of events.
    Unplugged,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Byte(u8),
    Fail,
}

// --- Mock Interface ---
/// Delivers each scripted event once the mock clock reaches its timestamp.
/// Time only moves through `delay_us`.
#[derive(Debug, Default)]
pub struct MockInterface {
    pub current_time_us: u64,
    script: VecDeque<(u64, LineEvent)>,
    pub reads: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `bytes` one byte time (4 ms) apart, starting at `start_ms`.
    /// Returns the time of the last byte in milliseconds.
    pub fn stage_block(&mut self, start_ms: u64, bytes: &[u8]) -> u64 {
        let mut t = start_ms;
        for &byte in bytes {
            self.script.push_back((t * 1000, LineEvent::Byte(byte)));
            t += 4;
        }
        t.saturating_sub(4)
    }

    pub fn stage_failure(&mut self, at_ms: u64) {
        self.script.push_back((at_ms * 1000, LineEvent::Fail));
    }

    pub fn remaining(&self) -> Vec<(u64, LineEvent)> {
        self.script.iter().copied().collect()
    }
}

impl MeterTimer for MockInterface {
    type Instant = MockInstant;
    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

impl MeterSerial for MockInterface {
    type Error = MockCommError;
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.reads += 1;
        match self.script.front().copied() {
            Some((at, event)) if at <= self.current_time_us => {
                self.script.pop_front();
                match event {
                    LineEvent::Byte(byte) => Ok(byte),
                    LineEvent::Fail => Err(nb::Error::Other(MockCommError::Injected)),
                }
            }
            Some(_) => Err(nb::Error::WouldBlock),
            None => Err(nb::Error::Other(MockCommError::Unplugged)),
        }
    }
}
