//! Engine timing configuration.

/// Output sample rate of the target hardware in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Scheduler tick period in milliseconds. One audio block is produced per tick.
pub const BLOCK_PERIOD_MS: u32 = 50;

/// How long a key press keeps its voice sounding, in milliseconds.
pub const HOLD_MS: u32 = 500;

/// Bytes per output sample (signed 16-bit, mono).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Timing parameters shared by the voice pool, the block renderer and the
/// control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Duration of one audio block in milliseconds.
    pub block_period_ms: u32,
    /// Voice hold duration in milliseconds.
    pub hold_ms: u32,
}

impl EngineConfig {
    /// Number of samples in one block.
    ///
    /// 44100 Hz at 50 ms gives 2205 samples.
    pub fn samples_per_block(&self) -> usize {
        (u64::from(self.sample_rate) * u64::from(self.block_period_ms) / 1000) as usize
    }

    /// Size of one packed block in bytes.
    pub fn block_bytes(&self) -> usize {
        self.samples_per_block() * BYTES_PER_SAMPLE
    }

    /// Sample rate as `f32`, the form the DSP code works in.
    #[inline]
    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate as f32
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            block_period_ms: BLOCK_PERIOD_MS,
            hold_ms: HOLD_MS,
        }
    }
}
