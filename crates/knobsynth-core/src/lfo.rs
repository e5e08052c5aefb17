//! Low-frequency oscillators and their modulation targets.
//!
//! There is one LFO per possible target, all five always exist, and at most
//! one is live at a time (the one matching
//! [`Synthesizer::lfo_target`](crate::synth::Synthesizer::lfo_target)).
//!
//! An LFO sample is the zero-centred sine table read at the LFO's phase,
//! scaled by `amplitude / 40000`. With the largest amplitude (16) the output
//! swings about ±13, which is added directly to the target: Hz for
//! frequency and cutoff targets, gain for amplitude targets.

use crate::switch::TriState;
use crate::waveform::sine;

/// LFO rates in Hz, log-spaced from about 0.95 Hz to 20 Hz.
pub const LFO_FREQUENCIES: [f32; 48] = [
    0.9470, 1.0105, 1.0782, 1.1505, 1.2277, 1.3100, 1.3978, 1.4916, //
    1.5916, 1.6983, 1.8122, 1.9337, 2.0633, 2.2017, 2.3493, 2.5068, //
    2.6749, 2.8542, 3.0456, 3.2498, 3.4677, 3.7002, 3.9483, 4.2131, //
    4.4955, 4.7970, 5.1186, 5.4618, 5.8280, 6.2188, 6.6358, 7.0807, //
    7.5554, 8.0620, 8.6026, 9.1794, 9.7949, 10.4516, 11.1524, 11.9002, //
    12.6981, 13.5495, 14.4579, 15.4273, 16.4617, 17.5655, 18.7433, 20.0000,
];

/// LFO depths. Index 0 switches modulation off.
pub const LFO_AMPLITUDES: [f32; 96] = [
    0.0, 2.5000, 2.5499, 2.6007, 2.6526, 2.7055, 2.7594, 2.8145, //
    2.8706, 2.9279, 2.9863, 3.0458, 3.1066, 3.1685, 3.2317, 3.2962, //
    3.3619, 3.4290, 3.4973, 3.5671, 3.6382, 3.7108, 3.7848, 3.8603, //
    3.9373, 4.0158, 4.0959, 4.1776, 4.2609, 4.3459, 4.4326, 4.5210, //
    4.6111, 4.7031, 4.7969, 4.8926, 4.9901, 5.0897, 5.1912, 5.2947, //
    5.4003, 5.5080, 5.6179, 5.7299, 5.8442, 5.9607, 6.0796, 6.2009, //
    6.3246, 6.4507, 6.5793, 6.7106, 6.8444, 6.9809, 7.1201, 7.2621, //
    7.4070, 7.5547, 7.7054, 7.8591, 8.0158, 8.1757, 8.3387, 8.5050, //
    8.6747, 8.8477, 9.0241, 9.2041, 9.3877, 9.5749, 9.7659, 9.9606, //
    10.1593, 10.3619, 10.5686, 10.7793, 10.9943, 11.2136, 11.4372, 11.6654, //
    11.8980, 12.1353, 12.3773, 12.6242, 12.8760, 13.1328, 13.3947, 13.6618, //
    13.9343, 14.2122, 14.4957, 14.7848, 15.0796, 15.3803, 15.6871, 16.0,
];

/// Highest LFO rate encoder count.
pub const MAX_FREQUENCY_COUNT: i32 = LFO_FREQUENCIES.len() as i32 - 1;

/// Highest LFO depth encoder count.
pub const MAX_AMPLITUDE_COUNT: i32 = LFO_AMPLITUDES.len() as i32 - 1;

/// Amplitude normalization shared with the oscillator volume.
const AMPLITUDE_SCALE: f32 = 40000.0;

/// Parameter an LFO modulates. The discriminant indexes the LFO bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LfoTarget {
    /// Oscillator 1 pitch
    Osc1Freq = 0,
    /// Oscillator 2 pitch
    Osc2Freq = 1,
    /// Oscillator 1 gain
    Osc1Amp = 2,
    /// Oscillator 2 gain
    Osc2Amp = 3,
    /// Low-pass cutoff
    LpfCutoff = 4,
}

/// Number of LFOs, one per target.
pub const LFO_COUNT: usize = 5;

impl LfoTarget {
    /// All targets in bank order.
    pub const ALL: [LfoTarget; LFO_COUNT] = [
        LfoTarget::Osc1Freq,
        LfoTarget::Osc2Freq,
        LfoTarget::Osc1Amp,
        LfoTarget::Osc2Amp,
        LfoTarget::LpfCutoff,
    ];

    /// Index into the LFO bank.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolves the live target from the oscillator-select and
    /// effects-target switches.
    ///
    /// ```text
    /// osc=Up,      target=Up      -> Osc1Freq
    /// osc=Up,      target=Down    -> Osc1Amp
    /// osc=Down,    target=Up      -> Osc2Freq
    /// osc=Down,    target=Down    -> Osc2Amp
    /// osc=Neutral, target=Neutral -> LpfCutoff
    /// anything else               -> None
    /// ```
    pub fn resolve(osc_select: TriState, effects_target: TriState) -> Option<Self> {
        match (osc_select, effects_target) {
            (TriState::Up, TriState::Up) => Some(LfoTarget::Osc1Freq),
            (TriState::Up, TriState::Down) => Some(LfoTarget::Osc1Amp),
            (TriState::Down, TriState::Up) => Some(LfoTarget::Osc2Freq),
            (TriState::Down, TriState::Down) => Some(LfoTarget::Osc2Amp),
            (TriState::Neutral, TriState::Neutral) => Some(LfoTarget::LpfCutoff),
            _ => None,
        }
    }

    /// Short name for logs and listings.
    pub fn name(self) -> &'static str {
        match self {
            LfoTarget::Osc1Freq => "osc1-freq",
            LfoTarget::Osc2Freq => "osc2-freq",
            LfoTarget::Osc1Amp => "osc1-amp",
            LfoTarget::Osc2Amp => "osc2-amp",
            LfoTarget::LpfCutoff => "lpf-cutoff",
        }
    }
}

/// Sine LFO with banked encoder counts.
#[derive(Debug, Clone)]
pub struct Lfo {
    frequency: f32,
    amplitude: f32,
    frequency_count: i32,
    amplitude_count: i32,
    /// 16.16 fixed-point phase.
    phase: u32,
    sample_rate: f32,
}

impl Lfo {
    /// Creates an LFO at the slowest rate and zero depth.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frequency: LFO_FREQUENCIES[0],
            amplitude: LFO_AMPLITUDES[0],
            frequency_count: 0,
            amplitude_count: 0,
            phase: 0,
            sample_rate,
        }
    }

    /// Sets the rate from an encoder count and returns the clamped count.
    pub fn set_frequency_count(&mut self, count: i32) -> i32 {
        self.frequency_count = count.clamp(0, MAX_FREQUENCY_COUNT);
        self.frequency = LFO_FREQUENCIES[self.frequency_count as usize];
        self.frequency_count
    }

    /// Sets the depth from an encoder count and returns the clamped count.
    pub fn set_amplitude_count(&mut self, count: i32) -> i32 {
        self.amplitude_count = count.clamp(0, MAX_AMPLITUDE_COUNT);
        self.amplitude = LFO_AMPLITUDES[self.amplitude_count as usize];
        self.amplitude_count
    }

    /// Rate in Hz.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Depth.
    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Raw rate encoder count.
    #[inline]
    pub fn frequency_count(&self) -> i32 {
        self.frequency_count
    }

    /// Raw depth encoder count.
    #[inline]
    pub fn amplitude_count(&self) -> i32 {
        self.amplitude_count
    }

    /// Current 16-bit phase.
    #[inline]
    pub fn phase(&self) -> u16 {
        (self.phase >> 16) as u16
    }

    /// Advances one output sample and returns the modulation value.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let step = f64::from(self.frequency) * 65536.0 / f64::from(self.sample_rate);
        self.phase = self.phase.wrapping_add((step * 65536.0) as u32);
        sine(self.phase()) as f32 * (self.amplitude / AMPLITUDE_SCALE)
    }
}
