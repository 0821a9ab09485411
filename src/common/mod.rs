// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod decode;
pub mod digit;
pub mod error;
pub mod flags;
pub mod frame;
pub mod hal_traits;
pub mod normalize;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From decode.rs
pub use decode::{decode, DigitImage};

// From error.rs
pub use error::{DecodeError, DigitError, MeterError};

// From flags.rs
pub use flags::{decode_flags, BaseUnit, DisplayFormat, FlagCode, Scale};

// From frame.rs
pub use frame::{HexDump, FRAME_LEN};

// From hal_traits.rs
pub use hal_traits::{MeterInstant, MeterSerial, MeterTimer};

// From normalize.rs
pub use normalize::{normalize, Normalized};

// From types.rs
pub use types::{Coupling, Reading, Unit};

// timing.rs constants are reached through common::timing::*
