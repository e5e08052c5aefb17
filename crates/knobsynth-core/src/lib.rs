//! Knobsynth Core - control routing and synthesis for a knob-panel synthesizer
//!
//! This crate holds everything between the raw panel pins and the packed
//! audio block: quadrature decoding, switch edge detection, banked parameter
//! routing, the voice pool, and the block renderer. It performs no I/O; the
//! `knobsynth-platform` crate drives it from hardware (or simulated) inputs.
//!
//! # Core Components
//!
//! ## Controls
//!
//! - [`QuadratureDecoder`] / [`Encoder`] - Gray-code rotary decoding with glitch rejection
//! - [`TriStateSwitch`] - Three-position switch with edge detection
//! - [`ParameterRouter`] - Six encoders and four switches banked onto the synth
//!
//! ## Synthesis
//!
//! - [`Synthesizer`] - Two oscillators, filter, five LFOs, master volume
//! - [`VoicePool`] - Four timed voice slots, no stealing
//! - [`LowPassFilter`] - Second-order Butterworth low-pass
//! - [`BlockSynthesizer`] - Renders 16-bit little-endian mono blocks
//!
//! ## Tables
//!
//! - [`Pitch`] / [`KEYMAP`] - Keyboard bytes to note frequencies
//! - [`SINE_LUT`] - 1024-entry unsigned sine table
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible and does not allocate. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! knobsynth-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use knobsynth_core::{
//!     BlockSynthesizer, EngineConfig, PanelReadings, ParameterRouter, Pitch, Synthesizer,
//!     VoicePool,
//! };
//!
//! let config = EngineConfig::default();
//! let mut synth = Synthesizer::new(config.sample_rate_hz());
//! let mut router = ParameterRouter::new();
//! let mut pool: VoicePool = VoicePool::new(config.hold_ms);
//! let mut renderer = BlockSynthesizer::new(config);
//!
//! // Oscillator 1 selected, LFO bank loaded.
//! let mut panel = PanelReadings::default();
//! panel.switches[0] = (true, false);
//! panel.switches[1] = (true, false);
//! router.initialize(&mut synth, &panel);
//!
//! pool.press(Pitch::from_byte(b'a'), 0);
//! let mut block = [0u8; 4410];
//! let stats = renderer.render(&mut synth, &mut pool, 0, &mut block);
//! assert_eq!(stats.active_voices, 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod block;
pub mod config;
pub mod encoder;
pub mod filter;
pub mod lfo;
pub mod oscillator;
pub mod pitch;
pub mod router;
pub mod sine_table;
pub mod switch;
pub mod synth;
pub mod voice;
pub mod waveform;

// Re-export main types at crate root
pub use block::{BlockStats, BlockSynthesizer, CUTOFF_MODULATION_INTERVAL};
pub use config::{BLOCK_PERIOD_MS, BYTES_PER_SAMPLE, EngineConfig, HOLD_MS, SAMPLE_RATE};
pub use encoder::{Direction, Encoder, InvalidTransition, QuadratureDecoder};
pub use filter::{CUTOFF_FREQUENCIES, Coefficients, LowPassFilter};
pub use lfo::{LFO_AMPLITUDES, LFO_COUNT, LFO_FREQUENCIES, Lfo, LfoTarget};
pub use oscillator::{MasterVolume, Oscillator, SHIFT_FREQUENCIES, volume_from_count};
pub use pitch::{KEYMAP, Pitch};
pub use router::{
    ENCODER_COUNT, EncoderId, OscContext, PanelReadings, ParameterRouter, PollReport,
    SWITCH_COUNT, SharedBank, SwitchId,
};
pub use sine_table::{SINE_LUT, SINE_LUT_LEN};
pub use switch::{Transition, TriState, TriStateSwitch};
pub use synth::{AmpModulator, OscId, Synthesizer};
pub use voice::{MAX_VOICES, PressOutcome, Voice, VoicePool, VoiceState};
pub use waveform::{Waveform, sine};
