// src/recorder/session/mod.rs

mod io_helpers;

use core::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::collector::{Dataset, LiveStatus, SampleCollector};
use super::config::RecorderConfig;
use super::framer::{Candidate, SilenceFramer};
use crate::common::{
    decode,
    error::MeterError,
    hal_traits::{MeterSerial, MeterTimer},
    HexDump,
};

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd<E> {
    /// The stop flag was raised.
    Interrupted,
    /// The device failed after data had been received.
    DeviceFailed(E),
}

/// Result of a finished session: the dataset plus some bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport<E> {
    pub dataset: Dataset,
    pub end: SessionEnd<E>,
    pub bytes_received: usize,
    pub frames_decoded: usize,
    pub frames_rejected: usize,
}

/// One recording session: serial bytes in, [`Dataset`] out.
///
/// Owns the device interface, the framer and the collector; nothing is shared,
/// so the loop needs no locking. All waiting happens inside the bounded read.
#[derive(Debug)]
pub struct Session<IF>
where
    IF: MeterSerial + MeterTimer,
{
    interface: IF,
    framer: SilenceFramer<IF::Instant>,
    collector: SampleCollector<IF::Instant>,
    config: RecorderConfig,
    bytes_received: usize,
    frames_rejected: usize,
}

impl<IF> Session<IF>
where
    IF: MeterSerial + MeterTimer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, RecorderConfig::default())
    }

    pub fn with_config(interface: IF, config: RecorderConfig) -> Self {
        Session {
            interface,
            framer: SilenceFramer::with_gap(config.silence_gap()),
            collector: SampleCollector::new(config.unit_policy),
            config,
            bytes_received: 0,
            frames_rejected: 0,
        }
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn into_interface(self) -> IF {
        self.interface
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Runs until `stop` is raised or the device fails, then finalizes.
    ///
    /// `on_status` sees every decoded reading, including ones the collector
    /// leaves out of the dataset. The stop flag is checked before each read, so
    /// an interrupt is noticed within one read timeout.
    ///
    /// Returns `Err` only if the device fails before the first byte arrives.
    /// Any later failure ends the session normally with whatever was recorded.
    pub fn run<F>(
        &mut self,
        stop: &AtomicBool,
        mut on_status: F,
    ) -> Result<SessionReport<IF::Error>, MeterError<IF::Error>>
    where
        F: FnMut(&LiveStatus),
    {
        info!(
            silence_gap_ms = self.config.silence_gap_ms,
            read_timeout_ms = self.config.read_timeout_ms,
            "session started"
        );

        let end = loop {
            if stop.load(Ordering::Relaxed) {
                break SessionEnd::Interrupted;
            }

            match self.read_byte_with_timeout() {
                Ok(byte) => {
                    let now = self.interface.now();
                    self.bytes_received += 1;
                    if let Some(candidate) = self.framer.push(byte, now) {
                        self.process(candidate, &mut on_status);
                    }
                }
                Err(MeterError::Timeout) => {
                    let now = self.interface.now();
                    if let Some(candidate) = self.framer.poll_idle(now) {
                        self.process(candidate, &mut on_status);
                    }
                }
                Err(MeterError::Io(e)) => {
                    if self.bytes_received == 0 {
                        return Err(MeterError::Io(e));
                    }
                    warn!(error = ?e, "device failed, ending session");
                    break SessionEnd::DeviceFailed(e);
                }
            }
        };

        // Whatever is still buffered may be a complete frame
        if let Some(candidate) = self.framer.finish() {
            self.process(candidate, &mut on_status);
        }

        let dataset = self.collector.finalize();
        info!(
            samples = dataset.len(),
            decoded = self.collector.decoded(),
            rejected = self.frames_rejected,
            "session finished"
        );

        Ok(SessionReport {
            dataset,
            end,
            bytes_received: self.bytes_received,
            frames_decoded: self.collector.decoded(),
            frames_rejected: self.frames_rejected,
        })
    }

    /// Dataset accumulated so far, without ending the session.
    pub fn snapshot(&self) -> Dataset {
        self.collector.finalize()
    }

    fn process<F>(&mut self, candidate: Candidate<IF::Instant>, on_status: &mut F)
    where
        F: FnMut(&LiveStatus),
    {
        match decode(candidate.as_bytes()) {
            Ok(reading) => {
                // Stamp with the frame's first byte so flush latency does not skew time
                let status = self.collector.accept(&reading, candidate.started_at);
                on_status(&status);
            }
            Err(error) => {
                self.frames_rejected += 1;
                debug!(
                    %error,
                    len = candidate.len(),
                    raw = %HexDump(candidate.as_bytes()),
                    "frame rejected"
                );
            }
        }
    }
}
