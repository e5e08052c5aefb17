//! Oscillator waveform shapes over a 16-bit phase.
//!
//! All shapes are zero-centred and span roughly `-0x8000..=0x8000`. Samples
//! are returned as `i32` so the extremes (`+0x8000` for square and triangle)
//! are representable; saturation to the 16-bit output range happens once,
//! when the block is packed.

use crate::sine_table::SINE_LUT;

/// Half of the 16-bit phase circle.
const HALF: i32 = 0x8000;

/// Quarter and three-quarter points of the phase circle.
const QUARTER: i32 = 0x4000;
const THREE_QUARTERS: i32 = 0xC000;

/// Basic oscillator waveforms.
///
/// The discriminants match the waveform encoder's selection order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Table-driven sine
    #[default]
    Sine = 0,
    /// Piecewise-linear triangle
    Triangle = 1,
    /// Square: low for the first half period, high for the second
    Square = 2,
    /// Rising sawtooth
    Sawtooth = 3,
}

impl Waveform {
    /// All waveforms in selection order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::Sawtooth,
    ];

    /// Selects a waveform from a raw encoder count.
    ///
    /// Eight detents per waveform, cycling every 32 detents: `(count >> 3) & 3`.
    pub fn from_count(count: i32) -> Self {
        Self::ALL[((count >> 3) & 0x03) as usize]
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Returns the waveform value at `phase`.
    ///
    /// ```text
    /// sine:     SINE_LUT[phase >> 6] - 0x8000
    /// square:   -0x8000 if phase <= 0x8000, else +0x8000
    /// triangle: 2*(phase - 0x4000) if phase <= 0x8000, else -2*(phase - 0xC000)
    /// sawtooth: phase - 0x8000
    /// ```
    #[inline]
    pub fn sample(self, phase: u16) -> i32 {
        let p = i32::from(phase);
        match self {
            Waveform::Sine => sine(phase),
            Waveform::Square => {
                if p <= HALF {
                    -HALF
                } else {
                    HALF
                }
            }
            Waveform::Triangle => {
                if p <= HALF {
                    2 * (p - QUARTER)
                } else {
                    -2 * (p - THREE_QUARTERS)
                }
            }
            Waveform::Sawtooth => p - HALF,
        }
    }
}

/// Zero-centred sine table lookup.
#[inline]
pub fn sine(phase: u16) -> i32 {
    i32::from(SINE_LUT[usize::from(phase >> 6)]) - HALF
}
