// src/recorder/collector.rs

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::num::ParseFloatError;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::UnitPolicy;
use crate::common::{hal_traits::MeterInstant, DisplayFormat, Reading, Unit};

/// One persisted reading, relative to the session origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(rename = "elapsedSeconds")]
    pub elapsed_secs: f64,
    pub formatted_value: String,
}

/// A session's output: one channel, ordered samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Unit of the first accepted reading, `None` if nothing was decoded.
    pub channel_unit: Option<String>,
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Converts to the on-disk layout shared with the other acquisition tools.
    ///
    /// Values are parsed back from their formatted text, so the file holds
    /// exactly what was displayed.
    pub fn to_file(&self) -> Result<DatasetFile, ParseFloatError> {
        let data = self
            .samples
            .iter()
            .map(|sample| -> Result<DataPoint, ParseFloatError> {
                let value = sample.formatted_value.parse::<f64>()?;
                Ok(DataPoint { time: sample.elapsed_secs, values: vec![value] })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DatasetFile { channels: self.channel_unit.iter().cloned().collect(), data })
    }
}

/// Dataset file layout: one label per channel, one value per channel per point.
///
/// ```json
/// { "channels": ["DC Volt"], "data": [{ "time": 0.0, "values": [5.48] }] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    pub channels: Vec<String>,
    pub data: Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Seconds since the session origin.
    pub time: f64,
    pub values: Vec<f64>,
}

/// Live side-channel record, one per decoded reading whether persisted or not.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LiveStatus {
    /// 1-based count of decoded readings in this session.
    pub index: usize,
    pub elapsed_secs: f64,
    pub value: f64,
    pub unit: Unit,
    pub display: DisplayFormat,
    /// Whether the reading made it into the dataset.
    pub persisted: bool,
}

impl fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:5}  {:8.2}  ", self.index, self.elapsed_secs)?;
        self.display.write_value(f, self.value)?;
        write!(f, " {}", self.unit)?;
        if !self.persisted {
            f.write_str("  (not recorded)")?;
        }
        Ok(())
    }
}

/// Accumulates decoded readings into a [`Dataset`].
///
/// The first reading fixes the session origin and the channel unit.
#[derive(Debug)]
pub struct SampleCollector<I> {
    origin: Option<I>,
    channel: Option<Unit>,
    samples: Vec<Sample>,
    decoded: usize,
    policy: UnitPolicy,
}

impl<I: MeterInstant> Default for SampleCollector<I> {
    fn default() -> Self {
        Self::new(UnitPolicy::default())
    }
}

impl<I: MeterInstant> SampleCollector<I> {
    pub fn new(policy: UnitPolicy) -> Self {
        SampleCollector {
            origin: None,
            channel: None,
            samples: Vec::new(),
            decoded: 0,
            policy,
        }
    }

    /// Records `reading`, observed at `now`, and returns its live status.
    pub fn accept(&mut self, reading: &Reading, now: I) -> LiveStatus {
        self.decoded += 1;

        let origin = *self.origin.get_or_insert(now);
        let channel = *self.channel.get_or_insert(reading.unit);
        let elapsed_secs = (now - origin).as_secs_f64();

        let persisted = reading.unit == channel || self.policy == UnitPolicy::Keep;
        if persisted {
            self.samples.push(Sample {
                elapsed_secs,
                formatted_value: reading.display.format(reading.value),
            });
        } else {
            debug!(
                unit = %reading.unit,
                channel = %channel,
                "unit differs from channel, sample not recorded"
            );
        }

        LiveStatus {
            index: self.decoded,
            elapsed_secs,
            value: reading.value,
            unit: reading.unit,
            display: reading.display,
            persisted,
        }
    }

    /// Snapshot of everything accepted so far. Calling it again returns the same data.
    pub fn finalize(&self) -> Dataset {
        Dataset {
            channel_unit: self.channel.map(|unit| unit.to_string()),
            samples: self.samples.clone(),
        }
    }

    pub fn channel_unit(&self) -> Option<Unit> {
        self.channel
    }

    pub fn origin(&self) -> Option<I> {
        self.origin
    }

    /// Readings seen, recorded or not.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Samples recorded.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn policy(&self) -> UnitPolicy {
        self.policy
    }
}
