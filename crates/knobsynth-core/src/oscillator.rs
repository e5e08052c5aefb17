//! Oscillator bank settings and the master volume.
//!
//! An oscillator here is the per-synth configuration (waveform, volume,
//! frequency shift); phase lives in each [`Voice`](crate::voice::Voice).
//! Every parameter keeps its raw encoder count alongside the derived value
//! so a context switch can put the knob back exactly where it was.

use crate::waveform::Waveform;

/// Frequency-shift multipliers, quarter-tone steps from 0.25x to 4x.
///
/// Index 24 is unity.
pub const SHIFT_FREQUENCIES: [f32; 49] = [
    0.250, 0.265, 0.281, 0.297, 0.315, 0.334, 0.354, 0.375, 0.397, 0.420, //
    0.445, 0.472, 0.500, 0.530, 0.561, 0.595, 0.630, 0.667, 0.707, 0.749, //
    0.794, 0.841, 0.891, 0.944, 1.000, 1.059, 1.122, 1.189, 1.260, 1.335, //
    1.414, 1.498, 1.587, 1.682, 1.782, 1.888, 2.000, 2.119, 2.245, 2.378, //
    2.520, 2.670, 2.828, 2.997, 3.175, 3.364, 3.564, 3.775, 4.000,
];

/// Highest volume encoder count. `50² * 16 = 40000`, full scale.
pub const MAX_VOLUME_COUNT: i32 = 50;

/// Highest frequency-shift encoder count.
///
/// The knob stops one short of the table's 4x entry, at 3.775x.
pub const MAX_SHIFT_COUNT: i32 = 47;

/// Waveform counts wrap within this many detents (four shapes, eight each).
pub const WAVE_COUNT_PERIOD: i32 = 32;

/// Volume that maps to unity gain.
pub const VOLUME_FULL_SCALE: f32 = 40000.0;

/// Power-on waveform count (square).
pub const DEFAULT_WAVE_COUNT: i32 = 20;
/// Power-on volume count.
pub const DEFAULT_VOLUME_COUNT: i32 = 40;
/// Power-on frequency-shift count (unity).
pub const DEFAULT_SHIFT_COUNT: i32 = 24;
/// Power-on master volume count.
pub const DEFAULT_MASTER_COUNT: i32 = 40;

/// Highest level accepted by the output amplifier.
pub const MAX_AMPLIFIER_LEVEL: u8 = 100;

/// Quadratic volume taper: `count² * 16`.
#[inline]
pub fn volume_from_count(count: i32) -> u16 {
    let c = count.clamp(0, MAX_VOLUME_COUNT) as u16;
    c * c * 16
}

/// Settings for one of the two oscillators.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    enabled: bool,
    waveform: Waveform,
    wave_count: i32,
    volume: u16,
    volume_count: i32,
    shift: f32,
    shift_count: i32,
}

impl Oscillator {
    /// Creates a disabled oscillator at the power-on counts.
    pub fn new() -> Self {
        let mut osc = Self {
            enabled: false,
            waveform: Waveform::Sine,
            wave_count: 0,
            volume: 0,
            volume_count: 0,
            shift: 1.0,
            shift_count: DEFAULT_SHIFT_COUNT,
        };
        osc.apply_waveform_count(DEFAULT_WAVE_COUNT);
        osc.apply_volume_count(DEFAULT_VOLUME_COUNT);
        osc.apply_shift_count(DEFAULT_SHIFT_COUNT);
        osc.enabled = false;
        osc
    }

    /// Whether the oscillator contributes to voices.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the oscillator.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Selected waveform.
    #[inline]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Raw waveform encoder count.
    #[inline]
    pub fn wave_count(&self) -> i32 {
        self.wave_count
    }

    /// Derived volume, `0..=40000`.
    #[inline]
    pub fn volume(&self) -> u16 {
        self.volume
    }

    /// Raw volume encoder count.
    #[inline]
    pub fn volume_count(&self) -> i32 {
        self.volume_count
    }

    /// Frequency-shift multiplier.
    #[inline]
    pub fn shift(&self) -> f32 {
        self.shift
    }

    /// Raw frequency-shift encoder count.
    #[inline]
    pub fn shift_count(&self) -> i32 {
        self.shift_count
    }

    /// Sets the waveform from an encoder count and returns the stored count.
    ///
    /// The count wraps into `0..32` so endless rotation cycles the shapes.
    pub fn apply_waveform_count(&mut self, count: i32) -> i32 {
        self.wave_count = count.rem_euclid(WAVE_COUNT_PERIOD);
        self.waveform = Waveform::from_count(self.wave_count);
        self.wave_count
    }

    /// Sets the volume from an encoder count and returns the clamped count.
    ///
    /// A zero volume disables the oscillator; any other volume enables it.
    pub fn apply_volume_count(&mut self, count: i32) -> i32 {
        self.volume_count = count.clamp(0, MAX_VOLUME_COUNT);
        self.volume = volume_from_count(self.volume_count);
        self.enabled = self.volume != 0;
        self.volume_count
    }

    /// Sets the frequency shift from an encoder count and returns the
    /// clamped count.
    pub fn apply_shift_count(&mut self, count: i32) -> i32 {
        self.shift_count = count.clamp(0, MAX_SHIFT_COUNT);
        self.shift = SHIFT_FREQUENCIES[self.shift_count as usize];
        self.shift_count
    }

    /// Phase increment per sample for a voice at `pitch_hz`.
    ///
    /// ```text
    /// step = (pitch_hz * shift + offset_hz) * 65536 / sample_rate
    /// ```
    ///
    /// `offset_hz` carries LFO frequency modulation.
    #[inline]
    pub fn phase_step(&self, pitch_hz: f32, offset_hz: f32, sample_rate: f32) -> f32 {
        (pitch_hz * self.shift + offset_hz) * 65536.0 / sample_rate
    }

    /// Output gain, `volume / 40000`, plus `offset` for LFO amplitude
    /// modulation.
    #[inline]
    pub fn gain(&self, offset: f32) -> f32 {
        f32::from(self.volume) / VOLUME_FULL_SCALE + offset
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

/// Master output level sent to the amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterVolume {
    count: i32,
    level: u8,
}

impl MasterVolume {
    /// Creates the master volume at its power-on count.
    pub fn new() -> Self {
        let mut master = Self { count: 0, level: 0 };
        master.apply_count(DEFAULT_MASTER_COUNT);
        master
    }

    /// Sets the level from an encoder count and returns the clamped count.
    ///
    /// `level = 27 + 2 * count`, capped at the amplifier maximum.
    pub fn apply_count(&mut self, count: i32) -> i32 {
        self.count = count.clamp(0, MAX_VOLUME_COUNT);
        self.level = (27 + 2 * self.count).min(i32::from(MAX_AMPLIFIER_LEVEL)) as u8;
        self.count
    }

    /// Raw encoder count.
    #[inline]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Amplifier level, `0..=100`.
    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for MasterVolume {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let osc = Oscillator::new();
        assert!(!osc.is_enabled());
        assert_eq!(osc.waveform(), Waveform::Square);
        assert_eq!(osc.volume_count(), 40);
        assert_eq!(osc.volume(), 25600);
        assert_eq!(osc.shift(), 1.0);
    }

    #[test]
    fn volume_taper_is_quadratic() {
        assert_eq!(volume_from_count(0), 0);
        assert_eq!(volume_from_count(10), 1600);
        assert_eq!(volume_from_count(50), 40000);
        assert_eq!(volume_from_count(80), 40000);
    }

    #[test]
    fn volume_count_drives_enable() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.apply_volume_count(-5), 0);
        assert!(!osc.is_enabled());
        assert_eq!(osc.apply_volume_count(12), 12);
        assert!(osc.is_enabled());
        assert_eq!(osc.volume(), 2304);
    }

    #[test]
    fn shift_count_is_clamped_to_table() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.apply_shift_count(100), 47);
        assert_eq!(osc.shift(), 3.775);
        assert_eq!(osc.apply_shift_count(48), 47);
        assert_eq!(osc.apply_shift_count(-1), 0);
        assert_eq!(osc.shift(), 0.25);
        assert_eq!(osc.apply_shift_count(36), 36);
        assert_eq!(osc.shift(), 2.0);
    }

    #[test]
    fn waveform_count_wraps() {
        let mut osc = Oscillator::new();
        assert_eq!(osc.apply_waveform_count(33), 1);
        assert_eq!(osc.waveform(), Waveform::Sine);
        assert_eq!(osc.apply_waveform_count(-1), 31);
        assert_eq!(osc.waveform(), Waveform::Sawtooth);
    }

    #[test]
    fn phase_step_for_c3() {
        let osc = Oscillator::new();
        let step = osc.phase_step(261.626, 0.0, 44100.0);
        assert!((step - 388.8).abs() < 0.1, "step = {step}");
    }

    #[test]
    fn gain_includes_offset() {
        let osc = Oscillator::new();
        assert!((osc.gain(0.0) - 0.64).abs() < 1e-6);
        assert!((osc.gain(0.5) - 1.14).abs() < 1e-6);
    }

    #[test]
    fn master_level_mapping() {
        let mut master = MasterVolume::new();
        assert_eq!(master.level(), 100);
        master.apply_count(0);
        assert_eq!(master.level(), 27);
        master.apply_count(20);
        assert_eq!(master.level(), 67);
        assert_eq!(master.apply_count(99), 50);
        assert_eq!(master.level(), 100);
    }

    #[test]
    fn shift_table_is_monotonic() {
        for pair in SHIFT_FREQUENCIES.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(SHIFT_FREQUENCIES[24], 1.0);
    }
}
