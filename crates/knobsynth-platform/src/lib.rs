//! Knobsynth Platform - hardware boundary and control loop
//!
//! This crate connects [`knobsynth_core`] to the outside world. It defines
//! the three collaborators the instrument needs and the loop that drives
//! them once per block period.
//!
//! # Collaborators
//!
//! - [`InputBank`] - Encoder and switch pin levels, polled once per tick
//! - [`KeyboardSource`] - ASCII bytes from the typing keyboard
//! - [`AudioSink`] - Accepts one packed block per tick and an amplifier level
//!
//! # Control Loop
//!
//! - [`Instrument`] - Owns the engine and collaborators; [`Instrument::tick`] runs one period
//! - [`Scheduler`] - Decides when the next tick is due
//! - [`PortExpanderInputs`] - [`InputBank`] over two 8-bit port-expander ports
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible (it needs `alloc` for the block buffer).
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! knobsynth-platform = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod instrument;
pub mod pin_map;
pub mod scheduler;

pub use error::PlatformError;
pub use instrument::{Instrument, TickReport};
pub use pin_map::{ENCODER_PINS, PinLocation, PortExpanderInputs, PortReader, PortSnapshot};
pub use scheduler::Scheduler;

// Re-export knobsynth-core types used in the collaborator signatures
pub use knobsynth_core::{EngineConfig, PanelReadings};

/// Source of encoder and switch pin levels.
pub trait InputBank {
    /// Reads every control once.
    fn poll(&mut self) -> Result<PanelReadings, PlatformError>;
}

/// Destination for rendered audio.
pub trait AudioSink {
    /// Hands over one packed block. May block for backpressure.
    fn write_block(&mut self, block: &[u8]) -> Result<(), PlatformError>;

    /// Sets the output amplifier level, `0..=100`.
    fn set_volume(&mut self, level: u8) -> Result<(), PlatformError>;
}

/// Non-blocking stream of keyboard bytes.
pub trait KeyboardSource {
    /// Next pending byte, or `None` when nothing is waiting.
    fn read_byte(&mut self) -> Option<u8>;
}
