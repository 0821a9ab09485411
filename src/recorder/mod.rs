// src/recorder/mod.rs

// Stream side: framing is always available, collection and sessions need `alloc`.
pub mod config;
pub mod framer;

#[cfg(feature = "alloc")]
pub mod collector;
#[cfg(feature = "alloc")]
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

// Re-export the public types
pub use config::{InvalidConfig, RecorderConfig, UnitPolicy};
pub use framer::{Candidate, SilenceFramer, MAX_CANDIDATE_LEN};

#[cfg(feature = "alloc")]
pub use collector::{DataPoint, Dataset, DatasetFile, LiveStatus, Sample, SampleCollector};
#[cfg(feature = "alloc")]
pub use session::{Session, SessionEnd, SessionReport};
