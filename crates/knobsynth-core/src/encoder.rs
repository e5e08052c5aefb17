//! Quadrature decoding for rotary encoders.
//!
//! A detented rotary encoder produces a two-bit Gray code on its A/B pins.
//! Each valid edge changes exactly one bit; the direction of travel through
//! the four states gives the direction of rotation:
//!
//! ```text
//! state = a + 2*b
//!
//! clockwise:         0 -> 1 -> 3 -> 2 -> 0   (+1 per edge)
//! counter-clockwise: 0 -> 2 -> 3 -> 1 -> 0   (-1 per edge)
//! ```
//!
//! A reading where both bits changed at once cannot come from a correctly
//! sampled encoder and is rejected with [`InvalidTransition`].

use core::fmt;

/// A rejected quadrature reading.
///
/// Either both pins changed between two samples, or a pin value was outside
/// `{0, 1}`. The decoder state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    /// Pin pair held before the rejected reading.
    pub held: (u8, u8),
    /// The rejected pin pair.
    pub read: (u8, u8),
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid quadrature transition {}{} -> {}{}",
            self.held.0, self.held.1, self.read.0, self.read.1
        )
    }
}

impl core::error::Error for InvalidTransition {}

/// Direction of a single decoded edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Accumulator incremented
    Clockwise,
    /// Accumulator decremented
    CounterClockwise,
}

impl Direction {
    /// Signed accumulator delta for this direction.
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Looks up the Gray-code transition between two combined pin states.
#[inline]
fn transition(past: u8, new: u8) -> Option<Direction> {
    match (past, new) {
        (0, 1) | (1, 3) | (3, 2) | (2, 0) => Some(Direction::Clockwise),
        (0, 2) | (2, 3) | (3, 1) | (1, 0) => Some(Direction::CounterClockwise),
        _ => None,
    }
}

/// Per-encoder quadrature state machine with a signed accumulator.
#[derive(Debug, Clone, Default)]
pub struct QuadratureDecoder {
    pin_a: u8,
    pin_b: u8,
    value: i32,
}

impl QuadratureDecoder {
    /// Creates a decoder with both pins low and a zero accumulator.
    pub const fn new() -> Self {
        Self {
            pin_a: 0,
            pin_b: 0,
            value: 0,
        }
    }

    /// Records the current pin levels without counting an edge.
    ///
    /// Used at start-up so the first poll does not register as a turn.
    pub fn prime(&mut self, pin_a: u8, pin_b: u8) {
        self.pin_a = pin_a & 0x01;
        self.pin_b = pin_b & 0x01;
    }

    /// Feeds one pin reading into the state machine.
    ///
    /// Returns `Ok(None)` when the pins are unchanged, `Ok(Some(direction))`
    /// after a valid edge, and `Err` when both pins changed at once or a pin
    /// is not `0` or `1`.
    pub fn update(&mut self, pin_a: u8, pin_b: u8) -> Result<Option<Direction>, InvalidTransition> {
        let both_changed = pin_a != self.pin_a && pin_b != self.pin_b;
        if both_changed || pin_a > 1 || pin_b > 1 {
            return Err(InvalidTransition {
                held: (self.pin_a, self.pin_b),
                read: (pin_a, pin_b),
            });
        }
        if pin_a == self.pin_a && pin_b == self.pin_b {
            return Ok(None);
        }

        let past = self.pin_a + 2 * self.pin_b;
        let new = pin_a + 2 * pin_b;
        self.pin_a = pin_a;
        self.pin_b = pin_b;

        let direction = transition(past, new);
        if let Some(direction) = direction {
            self.value = self.value.saturating_add(direction.delta());
        }
        Ok(direction)
    }

    /// Current accumulated value.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Overwrites the accumulated value.
    #[inline]
    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    /// Saturates `value` into `min..=max`, stores it and returns it.
    pub fn set_clamped(&mut self, value: i32, min: i32, max: i32) -> i32 {
        self.value = value.clamp(min, max);
        self.value
    }

    /// Last pin pair seen.
    #[inline]
    pub fn pins(&self) -> (u8, u8) {
        (self.pin_a, self.pin_b)
    }
}

/// A physical encoder: a decoder plus the handler bound to it.
///
/// The handler is a tag the owner dispatches on after every accepted edge.
#[derive(Debug, Clone)]
pub struct Encoder<H> {
    decoder: QuadratureDecoder,
    handler: Option<H>,
}

impl<H: Copy> Encoder<H> {
    /// Creates an encoder with no handler bound.
    pub const fn new() -> Self {
        Self {
            decoder: QuadratureDecoder::new(),
            handler: None,
        }
    }

    /// Binds the change handler.
    pub fn bind(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// The bound handler, if any.
    #[inline]
    pub fn handler(&self) -> Option<H> {
        self.handler
    }

    /// See [`QuadratureDecoder::update`].
    #[inline]
    pub fn update(&mut self, pin_a: u8, pin_b: u8) -> Result<Option<Direction>, InvalidTransition> {
        self.decoder.update(pin_a, pin_b)
    }

    /// Shared access to the decoder.
    #[inline]
    pub fn decoder(&self) -> &QuadratureDecoder {
        &self.decoder
    }

    /// Mutable access to the decoder.
    #[inline]
    pub fn decoder_mut(&mut self) -> &mut QuadratureDecoder {
        &mut self.decoder
    }

    /// Current accumulated value.
    #[inline]
    pub fn value(&self) -> i32 {
        self.decoder.value()
    }

    /// Overwrites the accumulated value.
    #[inline]
    pub fn set_value(&mut self, value: i32) {
        self.decoder.set_value(value);
    }

    /// See [`QuadratureDecoder::set_clamped`].
    #[inline]
    pub fn set_clamped(&mut self, value: i32, min: i32, max: i32) -> i32 {
        self.decoder.set_clamped(value, min, max)
    }
}

impl<H: Copy> Default for Encoder<H> {
    fn default() -> Self {
        Self::new()
    }
}
