// src/meter/mod.rs

// Meter side of the link: builds the frames a meter would transmit.
// Used to simulate a meter in tests and on a bench without hardware.

pub mod encoder;

pub use encoder::{encode, EncodeError};
