// src/std_support.rs

//! Hosted adapters: a `std::io::Read` serial source, the system clock, and
//! file helpers for configs and datasets.

use std::fs;
use std::io::{self, Read};
use std::num::ParseFloatError;
use std::path::Path;
use std::string::String;
use std::time::{Duration, Instant};

use tracing::info;

use crate::common::hal_traits::{MeterSerial, MeterTimer};
use crate::recorder::{Dataset, DatasetFile, InvalidConfig, RecorderConfig};

// --- Device adapter ---

/// Wraps any blocking reader (an opened serial port, a pipe) as a meter interface.
///
/// The reader should be configured with a short read timeout; a timeout is
/// reported as `WouldBlock` so the session keeps polling. End of input is an
/// error and ends the session.
#[derive(Debug)]
pub struct IoMeter<R> {
    reader: R,
}

impl<R: Read> IoMeter<R> {
    pub fn new(reader: R) -> Self {
        IoMeter { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> MeterSerial for IoMeter<R> {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(1) => Ok(buf[0]),
            Ok(_) => Err(nb::Error::Other(io::ErrorKind::UnexpectedEof.into())),
            Err(e) => match e.kind() {
                io::ErrorKind::TimedOut
                | io::ErrorKind::WouldBlock
                | io::ErrorKind::Interrupted => Err(nb::Error::WouldBlock),
                _ => Err(nb::Error::Other(e)),
            },
        }
    }
}

impl<R> MeterTimer for IoMeter<R> {
    type Instant = Instant;

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

// --- Errors ---

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("dataset file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("cannot serialize dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sample value is not a number: {0}")]
    Value(#[from] ParseFloatError),
}

// --- Config ---

impl RecorderConfig {
    /// Parses and validates a TOML config. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RecorderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// --- Dataset persistence ---

impl Dataset {
    /// Pretty JSON in the [`DatasetFile`] layout.
    pub fn to_json_pretty(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(&self.to_file()?)?)
    }

    /// Writes the dataset file, replacing `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), PersistError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)?;
        info!(path = %path.display(), samples = self.len(), "dataset written");
        Ok(())
    }
}

impl DatasetFile {
    pub fn read_json(path: &Path) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
