// tests/session.rs

use core::time::Duration;
use std::collections::VecDeque;
use std::io;
use std::ops::{Add, Sub};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use btmeter::common::hal_traits::{MeterSerial, MeterTimer};
use btmeter::common::{BaseUnit, Coupling, Scale, FRAME_LEN};
use btmeter::meter::encode;
use btmeter::{IoMeter, MeterError, RecorderConfig, Session, SessionEnd};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FakeInstant(u64); // microseconds

impl Add<Duration> for FakeInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        FakeInstant(self.0 + rhs.as_micros() as u64)
    }
}

impl Sub for FakeInstant {
    type Output = Duration;
    fn sub(self, rhs: Self) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

/// Replays timed bytes, then raises `stop` once the script is drained.
struct ReplayMeter<'a> {
    now_us: u64,
    script: VecDeque<(u64, u8)>,
    stop: &'a AtomicBool,
}

impl<'a> ReplayMeter<'a> {
    fn new(stop: &'a AtomicBool) -> Self {
        ReplayMeter { now_us: 0, script: VecDeque::new(), stop }
    }

    fn frame_at(mut self, start_ms: u64, frame: &[u8]) -> Self {
        for (i, &byte) in frame.iter().enumerate() {
            self.script.push_back(((start_ms + 4 * i as u64) * 1000, byte));
        }
        self
    }
}

impl MeterSerial for ReplayMeter<'_> {
    type Error = ();

    fn read_byte(&mut self) -> nb::Result<u8, ()> {
        match self.script.front() {
            Some(&(at, byte)) if at <= self.now_us => {
                self.script.pop_front();
                if self.script.is_empty() {
                    self.stop.store(true, Ordering::Relaxed);
                }
                Ok(byte)
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }
}

impl MeterTimer for ReplayMeter<'_> {
    type Instant = FakeInstant;

    fn delay_us(&mut self, us: u32) {
        self.now_us += u64::from(us);
    }

    fn now(&self) -> FakeInstant {
        FakeInstant(self.now_us)
    }
}

fn dc_volts(image: &str) -> [u8; FRAME_LEN] {
    encode(image, Coupling::Dc, Scale::None, BaseUnit::Volt).unwrap()
}

#[test]
fn interrupt_flushes_pending_frame() {
    init_tracing();
    let stop = AtomicBool::new(false);
    let meter = ReplayMeter::new(&stop)
        .frame_at(0, &dc_volts("12.00"))
        .frame_at(500, &dc_volts("12.05"))
        .frame_at(1000, &encode("-0.350", Coupling::Dc, Scale::Milli, BaseUnit::Volt).unwrap());

    let mut lines = Vec::new();
    let mut session = Session::new(meter);
    let report = session.run(&stop, |status| lines.push(status.to_string())).unwrap();

    assert_eq!(report.end, SessionEnd::Interrupted);
    assert_eq!(report.bytes_received, 3 * FRAME_LEN);
    assert_eq!(report.frames_decoded, 3);

    // The last frame differs in scale only, so the unit still matches
    let values: Vec<_> =
        report.dataset.samples.iter().map(|s| s.formatted_value.as_str()).collect();
    assert_eq!(values, ["12.000", "12.050", "-0.000350"]);
    assert_eq!(report.dataset.samples[2].elapsed_secs, 1.0);

    assert!(lines[0].ends_with("12.000 DC Volt"), "{}", lines[0]);

    // Same layout the graphing tool reads: channels[0], data[i].time, data[i].values[0]
    let json: serde_json::Value =
        serde_json::from_str(&report.dataset.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["channels"][0], "DC Volt");
    assert_eq!(json["data"][1]["time"], 0.5);
    assert_eq!(json["data"][1]["values"][0], 12.05);
    assert_eq!(json["data"][2]["values"][0], -0.00035);
}

#[test]
fn custom_gap_splits_close_frames() {
    init_tracing();
    let stop = AtomicBool::new(false);
    // Only 30 ms of silence between frames
    let meter = ReplayMeter::new(&stop)
        .frame_at(0, &dc_volts("01.00"))
        .frame_at(82, &dc_volts("02.00"));

    let config = RecorderConfig { silence_gap_ms: 20, ..RecorderConfig::default() };
    let mut session = Session::with_config(meter, config);
    let report = session.run(&stop, |_| {}).unwrap();
    assert_eq!(report.dataset.len(), 2);
    assert_eq!(report.frames_rejected, 0);

    // With the default gap both frames merge into one oversized candidate
    let stop = AtomicBool::new(false);
    let meter = ReplayMeter::new(&stop)
        .frame_at(0, &dc_volts("01.00"))
        .frame_at(82, &dc_volts("02.00"));
    let report = Session::new(meter).run(&stop, |_| {}).unwrap();
    assert!(report.dataset.is_empty());
    assert_eq!(report.frames_rejected, 1);
}

#[test]
fn io_reader_without_gaps() {
    init_tracing();
    let mut stream = dc_volts("05.48").to_vec();
    stream.extend_from_slice(&dc_volts("05.49"));

    let stop = AtomicBool::new(false);
    let report = Session::new(IoMeter::new(&stream[..])).run(&stop, |_| {}).unwrap();

    // No silence on a byte slice, so everything is one candidate
    match report.end {
        SessionEnd::DeviceFailed(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("unexpected end {:?}", other),
    }
    assert_eq!(report.bytes_received, 2 * FRAME_LEN);
    assert_eq!(report.frames_rejected, 1);
    assert!(report.dataset.is_empty());
    assert_eq!(report.dataset.channel_unit, None);
}

#[test]
fn io_reader_empty_is_start_error() {
    let stop = AtomicBool::new(false);
    let result = Session::new(IoMeter::new(io::empty())).run(&stop, |_| {});
    assert!(matches!(
        result,
        Err(MeterError::Io(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof
    ));
}
