//! Encoder pin assignment on the two port-expander ports.
//!
//! The six encoders share two 8-bit ports. Encoder `n`, pin `p` (0 = A,
//! 1 = B) lives at:
//!
//! ```text
//! n <= 3: port 0, bit 2n + p
//! n >= 4: port 1, bit 2(n - 4) + p
//! ```
//!
//! The assignment is data, kept in [`ENCODER_PINS`]; nothing else in the
//! stack knows about ports or bits.

use knobsynth_core::{ENCODER_COUNT, PanelReadings, SWITCH_COUNT};

use crate::{InputBank, PlatformError};

/// Number of port-expander ports.
pub const PORT_COUNT: usize = 2;

/// One pin's port and bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLocation {
    /// Port index, `0..PORT_COUNT`.
    pub port: u8,
    /// Bit within the port, `0..8`.
    pub bit: u8,
}

const fn pin(port: u8, bit: u8) -> PinLocation {
    PinLocation { port, bit }
}

/// `[pin_a, pin_b]` for each encoder, in encoder order.
pub static ENCODER_PINS: [[PinLocation; 2]; ENCODER_COUNT] = [
    [pin(0, 0), pin(0, 1)],
    [pin(0, 2), pin(0, 3)],
    [pin(0, 4), pin(0, 5)],
    [pin(0, 6), pin(0, 7)],
    [pin(1, 0), pin(1, 1)],
    [pin(1, 2), pin(1, 3)],
];

/// Raw port and switch levels captured in one read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortSnapshot {
    /// Port-expander input registers.
    pub ports: [u8; PORT_COUNT],
    /// `(pin_up, pin_down)` per switch, read from dedicated GPIO.
    pub switches: [(bool, bool); SWITCH_COUNT],
}

impl PortSnapshot {
    /// Level of one encoder pin, 0 or 1.
    #[inline]
    fn level(&self, location: PinLocation) -> u8 {
        (self.ports[usize::from(location.port)] >> location.bit) & 0x01
    }

    /// `(pin_a, pin_b)` of one encoder.
    pub fn encoder_pins(&self, encoder: usize) -> (u8, u8) {
        let [a, b] = ENCODER_PINS[encoder];
        (self.level(a), self.level(b))
    }

    /// Writes one encoder's pin levels into the port bytes.
    ///
    /// Only the low bit of each level is used.
    pub fn set_encoder_pins(&mut self, encoder: usize, pin_a: u8, pin_b: u8) {
        for (location, level) in ENCODER_PINS[encoder].into_iter().zip([pin_a, pin_b]) {
            let port = &mut self.ports[usize::from(location.port)];
            let mask = 1 << location.bit;
            if level & 0x01 == 0 {
                *port &= !mask;
            } else {
                *port |= mask;
            }
        }
    }

    /// Splits the snapshot into per-control readings.
    pub fn decode(&self) -> PanelReadings {
        PanelReadings {
            encoders: core::array::from_fn(|n| self.encoder_pins(n)),
            switches: self.switches,
        }
    }
}

/// Reads raw port and switch levels from hardware.
pub trait PortReader {
    /// Captures one snapshot.
    fn read_snapshot(&mut self) -> Result<PortSnapshot, PlatformError>;
}

/// [`InputBank`] over a port expander.
#[derive(Debug)]
pub struct PortExpanderInputs<R> {
    reader: R,
}

impl<R: PortReader> PortExpanderInputs<R> {
    /// Wraps a port reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The wrapped reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Mutable access to the wrapped reader.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }
}

impl<R: PortReader> InputBank for PortExpanderInputs<R> {
    fn poll(&mut self) -> Result<PanelReadings, PlatformError> {
        self.reader.read_snapshot().map(|snapshot| snapshot.decode())
    }
}
