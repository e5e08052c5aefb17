//! Second-order Butterworth low-pass filter.
//!
//! Coefficients come from a bilinear-style design on the cutoff normalized
//! to the sample rate, with a fixed `Q = sqrt(2)`:
//!
//! ```text
//! ita = 1 / tan(pi * fc)
//! a0  = 1 / (1 + q*ita + ita^2)
//! a1  = 2 * a0
//! a2  = a0
//! b1  = 2 * (ita^2 - 1) * a0
//! b2  = -(1 - q*ita + ita^2) * a0
//!
//! y[n] = a0*x[n] + a1*x[n-1] + a2*x[n-2] + b1*y[n-1] + b2*y[n-2]
//! ```
//!
//! A cutoff of exactly zero disables the filter: [`LowPassFilter::process`]
//! returns its input untouched and the history is not updated.

use core::f32::consts::{PI, SQRT_2};
use libm::tanf;

/// Cutoff frequencies in Hz selectable from the cutoff encoder.
///
/// Index 0 disables the filter; the rest are log-spaced from 20 Hz to 2 kHz.
pub const CUTOFF_FREQUENCIES: [f32; 97] = [
    0.0, 20.000, 20.993, 22.036, 23.131, 24.280, 25.485, //
    26.751, 28.080, 29.475, 30.939, 32.476, 34.089, 35.782, //
    37.559, 39.425, 41.383, 43.438, 45.596, 47.861, 50.238, //
    52.733, 55.352, 58.102, 60.987, 64.017, 67.196, 70.534, //
    74.037, 77.715, 81.575, 85.627, 89.880, 94.344, 99.030, //
    103.949, 109.112, 114.531, 120.220, 126.191, 132.459, 139.039, //
    145.945, 153.194, 160.803, 168.790, 177.173, 185.973, 195.211, //
    204.907, 215.084, 225.768, 236.981, 248.752, 261.108, 274.077, //
    287.690, 301.979, 316.979, 332.723, 349.249, 366.596, 384.805, //
    403.918, 423.980, 445.039, 467.144, 490.347, 514.703, 540.268, //
    567.103, 595.270, 624.837, 655.873, 688.450, 722.645, 758.538, //
    796.214, 835.762, 877.274, 920.848, 966.586, 1014.596, 1064.991, //
    1117.888, 1173.413, 1231.696, 1292.874, 1357.091, 1424.497, 1495.251, //
    1569.520, 1647.477, 1729.307, 1815.201, 1905.361, 2000.000,
];

/// Highest cutoff encoder count.
pub const MAX_CUTOFF_COUNT: i32 = CUTOFF_FREQUENCIES.len() as i32 - 1;

/// Highest resonance encoder count.
pub const MAX_RESONANCE_COUNT: i32 = MAX_CUTOFF_COUNT;

/// Lowest cutoff a modulated filter is driven to, in Hz.
const MIN_MODULATED_HZ: f32 = 1.0;

/// Filter coefficients: three feed-forward, two feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feed-forward on x[n]
    pub a0: f32,
    /// Feed-forward on x[n-1]
    pub a1: f32,
    /// Feed-forward on x[n-2]
    pub a2: f32,
    /// Feedback on y[n-1]
    pub b1: f32,
    /// Feedback on y[n-2]
    pub b2: f32,
}

impl Coefficients {
    /// Identity: `y[n] = x[n]`.
    pub const PASSTHROUGH: Self = Self {
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
        b1: 0.0,
        b2: 0.0,
    };

    /// Derives Butterworth low-pass coefficients for a cutoff given as a
    /// fraction of the sample rate (`0 < fc < 0.5`).
    ///
    /// Pure function of `fc`.
    pub fn lowpass(fc: f32) -> Self {
        let ita = 1.0 / tanf(PI * fc);
        let q = SQRT_2;
        let ita2 = ita * ita;

        let a0 = 1.0 / (1.0 + q * ita + ita2);
        Self {
            a0,
            a1: 2.0 * a0,
            a2: a0,
            b1: 2.0 * (ita2 - 1.0) * a0,
            b2: -(1.0 - q * ita + ita2) * a0,
        }
    }
}

/// Low-pass filter with banked cutoff/resonance encoder counts.
///
/// Resonance is stored and banked but does not yet shape the response.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    sample_rate: f32,
    /// Cutoff as a fraction of the sample rate. Zero means bypassed.
    cutoff: f32,
    cutoff_hz: f32,
    cutoff_count: i32,
    resonance: f32,
    resonance_count: i32,
    modulated: bool,

    coefficients: Coefficients,

    /// Input history: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output history: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl LowPassFilter {
    /// Creates a bypassed filter.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            cutoff: 0.0,
            cutoff_hz: 0.0,
            cutoff_count: 0,
            resonance: 0.0,
            resonance_count: 0,
            modulated: false,
            coefficients: Coefficients::PASSTHROUGH,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the cutoff in Hz and recomputes the coefficients.
    ///
    /// Zero (or less) bypasses the filter.
    pub fn set_cutoff_hz(&mut self, hz: f32) {
        self.cutoff_hz = hz.max(0.0);
        self.cutoff = self.cutoff_hz / self.sample_rate;
        self.modulated = false;
        self.coefficients = self.design(self.cutoff_hz);
    }

    /// Sets the cutoff from an encoder count and returns the clamped count.
    pub fn set_cutoff_count(&mut self, count: i32) -> i32 {
        self.cutoff_count = count.clamp(0, MAX_CUTOFF_COUNT);
        self.set_cutoff_hz(CUTOFF_FREQUENCIES[self.cutoff_count as usize]);
        self.cutoff_count
    }

    /// Stores the resonance encoder count and returns the clamped count.
    pub fn set_resonance_count(&mut self, count: i32) -> i32 {
        self.resonance_count = count.clamp(0, MAX_RESONANCE_COUNT);
        self.resonance = self.resonance_count as f32;
        self.resonance_count
    }

    /// Offsets the cutoff by `offset_hz` without changing the stored
    /// setting. Ignored while the filter is bypassed.
    pub fn modulate(&mut self, offset_hz: f32) {
        if !self.is_enabled() {
            return;
        }
        let nyquist_guard = self.sample_rate * 0.49;
        let hz = (self.cutoff_hz + offset_hz).clamp(MIN_MODULATED_HZ, nyquist_guard);
        self.coefficients = self.design(hz);
        self.modulated = true;
    }

    /// Restores the coefficients for the stored cutoff after modulation.
    pub fn clear_modulation(&mut self) {
        if self.modulated {
            self.coefficients = self.design(self.cutoff_hz);
            self.modulated = false;
        }
    }

    fn design(&self, hz: f32) -> Coefficients {
        if hz > 0.0 {
            Coefficients::lowpass(hz / self.sample_rate)
        } else {
            Coefficients::PASSTHROUGH
        }
    }

    /// Whether filtering is active (cutoff above zero).
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.cutoff > 0.0
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if !self.is_enabled() {
            return input;
        }
        let c = &self.coefficients;
        let output = c.a0 * input
            + c.a1 * self.x1
            + c.a2 * self.x2
            + c.b1 * self.y1
            + c.b2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the sample history.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Normalized cutoff, `cutoff_hz / sample_rate`.
    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Stored cutoff in Hz.
    #[inline]
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Raw cutoff encoder count.
    #[inline]
    pub fn cutoff_count(&self) -> i32 {
        self.cutoff_count
    }

    /// Resonance placeholder value.
    #[inline]
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Raw resonance encoder count.
    #[inline]
    pub fn resonance_count(&self) -> i32 {
        self.resonance_count
    }
}
