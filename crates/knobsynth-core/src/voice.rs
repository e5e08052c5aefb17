//! Key/voice slots and the fixed voice pool.
//!
//! Each key press claims one [`Voice`] for a fixed hold duration. There is no
//! note-off: a voice sounds until its hold deadline passes and then returns
//! to [`VoiceState::Idle`]. Pressing the same key again while it sounds
//! extends the deadline instead of claiming a second slot.

use crate::config::HOLD_MS;
use crate::pitch::Pitch;

/// Default pool size.
pub const MAX_VOICES: usize = 4;

/// Number of oscillator phase accumulators carried by each voice.
pub const OSCILLATORS_PER_VOICE: usize = 2;

/// Lifecycle of a voice slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceState {
    /// Free for allocation
    #[default]
    Idle,
    /// Sounding until the hold deadline
    Pressed,
    /// Release phase. Never entered: voices go straight from `Pressed` to
    /// `Idle` when the hold deadline passes.
    Released,
}

/// A single key/voice slot.
///
/// Phases are 16.16 fixed point; the top 16 bits index the waveform.
#[derive(Debug, Clone, Default)]
pub struct Voice {
    pitch: Pitch,
    state: VoiceState,
    phases: [u32; OSCILLATORS_PER_VOICE],
    hold_until_ms: u64,
    release_until_ms: u64,
}

impl Voice {
    /// Creates an idle voice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pitch bound to this slot.
    #[inline]
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// Whether this voice contributes to the output.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.state == VoiceState::Pressed
    }

    /// Hold deadline in milliseconds of uptime.
    #[inline]
    pub fn hold_until_ms(&self) -> u64 {
        self.hold_until_ms
    }

    /// Release deadline in milliseconds of uptime. Tracks the hold deadline.
    #[inline]
    pub fn release_until_ms(&self) -> u64 {
        self.release_until_ms
    }

    /// 16-bit phase of oscillator `osc`.
    #[inline]
    pub fn phase(&self, osc: usize) -> u16 {
        (self.phases[osc] >> 16) as u16
    }

    /// Advances oscillator `osc` by `step` phase units (65536 per cycle)
    /// and returns the new 16-bit phase.
    ///
    /// Negative steps run the phase backwards; the accumulator wraps.
    #[inline]
    pub fn advance(&mut self, osc: usize, step: f32) -> u16 {
        let fixed = (f64::from(step) * 65536.0) as i64;
        self.phases[osc] = self.phases[osc].wrapping_add(fixed as u32);
        self.phase(osc)
    }

    fn claim(&mut self, pitch: Pitch, deadline_ms: u64) {
        self.pitch = pitch;
        self.state = VoiceState::Pressed;
        self.phases = [0; OSCILLATORS_PER_VOICE];
        self.extend(deadline_ms);
    }

    fn extend(&mut self, deadline_ms: u64) {
        self.state = VoiceState::Pressed;
        self.hold_until_ms = deadline_ms;
        self.release_until_ms = deadline_ms;
    }
}

/// Result of a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// A sounding voice already had this pitch; its deadline was extended.
    Refreshed(usize),
    /// An idle slot was claimed.
    Allocated(usize),
    /// Every slot is busy with another pitch; the press was ignored.
    Dropped,
}

/// Fixed pool of voice slots. No voice stealing.
///
/// # Example
///
/// ```rust
/// use knobsynth_core::{Pitch, PressOutcome, VoicePool};
///
/// let mut pool: VoicePool<4> = VoicePool::new(500);
/// assert_eq!(pool.press(Pitch::C3, 0), PressOutcome::Allocated(0));
/// assert_eq!(pool.press(Pitch::C3, 100), PressOutcome::Refreshed(0));
/// assert_eq!(pool.expire(600), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VoicePool<const N: usize = MAX_VOICES> {
    voices: [Voice; N],
    hold_ms: u64,
}

impl<const N: usize> VoicePool<N> {
    /// Creates a pool of idle voices with the given hold duration.
    pub fn new(hold_ms: u32) -> Self {
        Self {
            voices: core::array::from_fn(|_| Voice::new()),
            hold_ms: u64::from(hold_ms),
        }
    }

    /// Registers a key press at `now_ms`.
    ///
    /// A non-idle slot already bound to `pitch` gets a fresh deadline.
    /// Otherwise the first idle slot is claimed with both phases reset.
    pub fn press(&mut self, pitch: Pitch, now_ms: u64) -> PressOutcome {
        let deadline = now_ms + self.hold_ms;

        if let Some(index) = self
            .voices
            .iter()
            .position(|v| v.state != VoiceState::Idle && v.pitch == pitch)
        {
            self.voices[index].extend(deadline);
            return PressOutcome::Refreshed(index);
        }

        match self.voices.iter().position(|v| v.state == VoiceState::Idle) {
            Some(index) => {
                self.voices[index].claim(pitch, deadline);
                PressOutcome::Allocated(index)
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(pitch = pitch.name(), "voice pool full, press dropped");
                PressOutcome::Dropped
            }
        }
    }

    /// Returns every pressed voice whose hold deadline has passed to idle.
    ///
    /// Returns how many voices were released.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let mut expired = 0;
        for voice in &mut self.voices {
            if voice.state == VoiceState::Pressed && now_ms >= voice.hold_until_ms {
                voice.state = VoiceState::Idle;
                expired += 1;
            }
        }
        expired
    }

    /// All slots.
    #[inline]
    pub fn voices(&self) -> &[Voice; N] {
        &self.voices
    }

    /// Mutable access to all slots, for rendering.
    #[inline]
    pub fn voices_mut(&mut self) -> &mut [Voice; N] {
        &mut self.voices
    }

    /// Number of pressed voices.
    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_pressed()).count()
    }

    /// Hold duration in milliseconds.
    #[inline]
    pub fn hold_ms(&self) -> u64 {
        self.hold_ms
    }
}

impl<const N: usize> Default for VoicePool<N> {
    fn default() -> Self {
        Self::new(HOLD_MS)
    }
}
