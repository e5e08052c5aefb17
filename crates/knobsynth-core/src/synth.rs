//! The synthesizer parameter state and per-voice rendering.
//!
//! [`Synthesizer`] owns every logical parameter the front panel can reach:
//! two oscillators, the low-pass filter, five LFOs, the master volume, and
//! the homes for the amplitude-modulator and special-effect counts that the
//! shared encoders bank into. It is mutated only by the
//! [`ParameterRouter`](crate::router::ParameterRouter) and read by the
//! [`BlockSynthesizer`](crate::block::BlockSynthesizer).

use crate::filter::LowPassFilter;
use crate::lfo::{LFO_COUNT, Lfo, LfoTarget};
use crate::oscillator::{MasterVolume, Oscillator};
use crate::voice::Voice;

/// Upper bound for counts that have a home but no sound yet.
pub const MAX_PLACEHOLDER_COUNT: i32 = 99;

/// One of the two oscillators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OscId {
    /// Oscillator 1
    Osc1 = 0,
    /// Oscillator 2
    Osc2 = 1,
}

impl OscId {
    /// Both oscillators in order.
    pub const ALL: [OscId; 2] = [OscId::Osc1, OscId::Osc2];

    /// Index into the oscillator bank and the voice phase array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// LFO target that bends this oscillator's pitch.
    #[inline]
    pub fn frequency_target(self) -> LfoTarget {
        match self {
            OscId::Osc1 => LfoTarget::Osc1Freq,
            OscId::Osc2 => LfoTarget::Osc2Freq,
        }
    }

    /// LFO target that modulates this oscillator's gain.
    #[inline]
    pub fn amplitude_target(self) -> LfoTarget {
        match self {
            OscId::Osc1 => LfoTarget::Osc1Amp,
            OscId::Osc2 => LfoTarget::Osc2Amp,
        }
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            OscId::Osc1 => "osc1",
            OscId::Osc2 => "osc2",
        }
    }
}

/// Amplitude-modulator counts. Banked and clamped, not yet audible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmpModulator {
    /// Attack encoder count
    pub attack: i32,
    /// Sustain encoder count
    pub sustain: i32,
    /// Release encoder count
    pub release: i32,
}

/// All panel-reachable synthesizer parameters.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    sample_rate: f32,
    oscillators: [Oscillator; 2],
    filter: LowPassFilter,
    lfos: [Lfo; LFO_COUNT],
    lfo_target: Option<LfoTarget>,
    master: MasterVolume,
    amp_modulator: AmpModulator,
    effect_counts: [i32; 2],
    /// LFO rate/depth counts held while the switches select no target.
    unassigned_lfo_counts: [i32; 2],
}

impl Synthesizer {
    /// Creates the power-on parameter set.
    ///
    /// Both oscillators start disabled; selecting one enables it.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            oscillators: [Oscillator::new(), Oscillator::new()],
            filter: LowPassFilter::new(sample_rate),
            lfos: core::array::from_fn(|_| Lfo::new(sample_rate)),
            lfo_target: None,
            master: MasterVolume::new(),
            amp_modulator: AmpModulator::default(),
            effect_counts: [0; 2],
            unassigned_lfo_counts: [0; 2],
        }
    }

    /// Output sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Oscillator settings.
    #[inline]
    pub fn oscillator(&self, id: OscId) -> &Oscillator {
        &self.oscillators[id.index()]
    }

    /// Mutable oscillator settings.
    #[inline]
    pub fn oscillator_mut(&mut self, id: OscId) -> &mut Oscillator {
        &mut self.oscillators[id.index()]
    }

    /// The low-pass filter.
    #[inline]
    pub fn filter(&self) -> &LowPassFilter {
        &self.filter
    }

    /// Mutable low-pass filter.
    #[inline]
    pub fn filter_mut(&mut self) -> &mut LowPassFilter {
        &mut self.filter
    }

    /// The LFO dedicated to `target`.
    #[inline]
    pub fn lfo(&self, target: LfoTarget) -> &Lfo {
        &self.lfos[target.index()]
    }

    /// Mutable LFO dedicated to `target`.
    #[inline]
    pub fn lfo_mut(&mut self, target: LfoTarget) -> &mut Lfo {
        &mut self.lfos[target.index()]
    }

    /// The live LFO target, if the switches select one.
    #[inline]
    pub fn lfo_target(&self) -> Option<LfoTarget> {
        self.lfo_target
    }

    /// Points the live LFO at a new target.
    pub fn set_lfo_target(&mut self, target: Option<LfoTarget>) {
        self.lfo_target = target;
    }

    /// Master volume.
    #[inline]
    pub fn master(&self) -> &MasterVolume {
        &self.master
    }

    /// Mutable master volume.
    #[inline]
    pub fn master_mut(&mut self) -> &mut MasterVolume {
        &mut self.master
    }

    /// Amplitude-modulator counts.
    #[inline]
    pub fn amp_modulator(&self) -> &AmpModulator {
        &self.amp_modulator
    }

    /// Mutable amplitude-modulator counts.
    #[inline]
    pub fn amp_modulator_mut(&mut self) -> &mut AmpModulator {
        &mut self.amp_modulator
    }

    /// Special-effect counts.
    #[inline]
    pub fn effect_counts(&self) -> [i32; 2] {
        self.effect_counts
    }

    /// Stores the special-effect counts.
    pub fn set_effect_counts(&mut self, counts: [i32; 2]) {
        self.effect_counts = counts;
    }

    /// LFO counts held while no target is selected.
    #[inline]
    pub fn unassigned_lfo_counts(&self) -> [i32; 2] {
        self.unassigned_lfo_counts
    }

    /// Stores the LFO counts held while no target is selected.
    pub fn set_unassigned_lfo_counts(&mut self, counts: [i32; 2]) {
        self.unassigned_lfo_counts = counts;
    }

    /// Advances the live LFO by one output sample and returns its value.
    ///
    /// Returns 0 when no target is selected. Inactive LFOs hold their phase.
    #[inline]
    pub fn next_modulation(&mut self) -> f32 {
        match self.lfo_target {
            Some(target) => self.lfos[target.index()].next_sample(),
            None => 0.0,
        }
    }

    /// Renders one sample of `voice`: both enabled oscillators, summed.
    ///
    /// `modulation` is this sample's LFO value; it bends the pitch or gain
    /// of whichever oscillator parameter is the live target.
    #[inline]
    pub fn render_voice(&self, voice: &mut Voice, modulation: f32) -> f32 {
        let pitch_hz = voice.pitch().frequency();
        let mut sum = 0.0;

        for id in OscId::ALL {
            let osc = &self.oscillators[id.index()];
            if !osc.is_enabled() {
                continue;
            }

            let freq_offset = if self.lfo_target == Some(id.frequency_target()) {
                modulation
            } else {
                0.0
            };
            let step = osc.phase_step(pitch_hz, freq_offset, self.sample_rate);
            let phase = voice.advance(id.index(), step);

            let gain_offset = if self.lfo_target == Some(id.amplitude_target()) {
                modulation
            } else {
                0.0
            };
            sum += osc.waveform().sample(phase) as f32 * osc.gain(gain_offset);
        }

        sum
    }
}
