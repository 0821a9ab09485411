// src/lib.rs

#![no_std] // Decode path needs neither std nor alloc

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod common;
pub mod meter;
pub mod recorder;

#[cfg(feature = "std")]
pub mod std_support;

// Re-export key types for convenience
pub use common::{decode, DecodeError, MeterError, Reading, Unit};
pub use recorder::{Candidate, RecorderConfig, SilenceFramer, UnitPolicy};

#[cfg(feature = "alloc")]
pub use recorder::{
    Dataset, DatasetFile, LiveStatus, Sample, SampleCollector, Session, SessionEnd, SessionReport,
};

#[cfg(feature = "std")]
pub use std_support::{ConfigError, IoMeter, PersistError};
