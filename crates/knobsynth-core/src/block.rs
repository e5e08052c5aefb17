//! Fixed-duration audio block rendering.
//!
//! One block is `sample_rate * block_period_ms / 1000` signed 16-bit mono
//! samples, packed little-endian. For each sample:
//!
//! 1. the live LFO advances once and yields the modulation value
//! 2. every pressed voice is rendered and summed
//! 3. the sum runs through the low-pass filter
//! 4. the result is clamped to `±32767` and packed
//!
//! When the LFO targets the filter cutoff, the filter is redesigned from the
//! modulated cutoff every [`CUTOFF_MODULATION_INTERVAL`] samples rather than
//! every sample.

use crate::config::{BYTES_PER_SAMPLE, EngineConfig};
use crate::lfo::LfoTarget;
use crate::synth::Synthesizer;
use crate::voice::VoicePool;

/// Samples between filter coefficient refreshes under cutoff modulation.
pub const CUTOFF_MODULATION_INTERVAL: usize = 32;

/// Largest packed sample magnitude.
const SAMPLE_LIMIT: f32 = 32767.0;

/// Summary of one rendered block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// Voices returned to idle before rendering.
    pub expired: usize,
    /// Voices that contributed to the block.
    pub active_voices: usize,
    /// Largest absolute packed sample.
    pub peak: u16,
}

/// Renders audio blocks from the synthesizer and voice pool.
#[derive(Debug, Clone)]
pub struct BlockSynthesizer {
    config: EngineConfig,
    rendered: u64,
}

impl BlockSynthesizer {
    /// Creates a renderer for the given timing.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rendered: 0,
        }
    }

    /// Timing this renderer was built with.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Size of one packed block in bytes.
    #[inline]
    pub fn block_bytes(&self) -> usize {
        self.config.block_bytes()
    }

    /// Number of blocks rendered so far.
    #[inline]
    pub fn blocks_rendered(&self) -> u64 {
        self.rendered
    }

    /// Expires held voices at `now_ms`, then fills `block` with packed
    /// samples.
    ///
    /// Writes `block.len() / 2` samples; a trailing odd byte is left alone.
    pub fn render<const N: usize>(
        &mut self,
        synth: &mut Synthesizer,
        pool: &mut VoicePool<N>,
        now_ms: u64,
        block: &mut [u8],
    ) -> BlockStats {
        let expired = pool.expire(now_ms);
        let active_voices = pool.active_count();
        let cutoff_modulated = synth.lfo_target() == Some(LfoTarget::LpfCutoff);
        if !cutoff_modulated {
            synth.filter_mut().clear_modulation();
        }

        let mut peak = 0u16;
        for (n, frame) in block.chunks_exact_mut(BYTES_PER_SAMPLE).enumerate() {
            let modulation = synth.next_modulation();
            if cutoff_modulated && n % CUTOFF_MODULATION_INTERVAL == 0 {
                synth.filter_mut().modulate(modulation);
            }

            let mut mix = 0.0f32;
            for voice in pool.voices_mut().iter_mut().filter(|v| v.is_pressed()) {
                mix += synth.render_voice(voice, modulation);
            }

            let filtered = synth.filter_mut().process(mix);
            let sample = pack(filtered);
            peak = peak.max(sample.unsigned_abs());
            frame.copy_from_slice(&sample.to_le_bytes());
        }

        self.rendered += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            block = self.rendered,
            expired,
            active_voices,
            peak,
            "block rendered"
        );

        BlockStats {
            expired,
            active_voices,
            peak,
        }
    }
}

impl Default for BlockSynthesizer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Saturates a mixed sample into the packed range.
#[inline]
fn pack(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    sample.clamp(-SAMPLE_LIMIT, SAMPLE_LIMIT) as i16
}
