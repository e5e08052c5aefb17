//! Scripted stand-ins for the panel, the keyboard and the amplifier.
//!
//! A session drives the real [`Instrument`](knobsynth_platform::Instrument)
//! with these collaborators instead of hardware, one tick per block period.

use std::collections::VecDeque;
use std::path::Path;

use knobsynth_core::{ENCODER_COUNT, EncoderId, SwitchId, TriState};
use knobsynth_platform::{AudioSink, KeyboardSource, PlatformError, PortReader, PortSnapshot};

/// Detent positions, clockwise from rest.
const DETENT_PINS: [(u8, u8); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

/// Keyboard slot that types nothing.
pub const REST: char = '-';

/// Port expander whose knobs advance one detent per read.
#[derive(Debug, Default)]
pub struct ScriptedPanel {
    snapshot: PortSnapshot,
    pending: [i32; ENCODER_COUNT],
    positions: [usize; ENCODER_COUNT],
}

impl ScriptedPanel {
    /// Moves a switch. Takes effect on the next read.
    pub fn set_switch(&mut self, id: SwitchId, state: TriState) {
        self.snapshot.switches[id.index()] = state.pins();
    }

    /// Queues `detents` clicks on one knob, positive for clockwise.
    pub fn queue_turn(&mut self, id: EncoderId, detents: i32) {
        let pending = &mut self.pending[id.index()];
        *pending = pending.saturating_add(detents);
    }

    /// Largest number of clicks still waiting on any knob.
    pub fn pending_detents(&self) -> u32 {
        self.pending
            .iter()
            .map(|d| d.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

impl PortReader for ScriptedPanel {
    fn read_snapshot(&mut self) -> Result<PortSnapshot, PlatformError> {
        for n in 0..ENCODER_COUNT {
            let remaining = self.pending[n];
            if remaining == 0 {
                continue;
            }
            let step = if remaining > 0 { 1 } else { DETENT_PINS.len() - 1 };
            self.positions[n] = (self.positions[n] + step) % DETENT_PINS.len();
            self.pending[n] -= remaining.signum();
            let (a, b) = DETENT_PINS[self.positions[n]];
            self.snapshot.set_encoder_pins(n, a, b);
        }
        Ok(self.snapshot)
    }
}

/// Keyboard that types at most one character per tick.
///
/// The instrument drains the keyboard until it reports nothing waiting, so
/// every delivered byte is followed by one `None` that closes the tick.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    slots: VecDeque<Option<u8>>,
    delivered: bool,
}

impl ScriptedKeys {
    /// One slot per character of `text`, after `lead_in` empty slots.
    /// [`REST`] leaves its slot empty.
    pub fn new(text: &str, lead_in: usize) -> Self {
        let typed = text.bytes().map(|b| (b != REST as u8).then_some(b));
        Self {
            slots: core::iter::repeat_n(None, lead_in).chain(typed).collect(),
            delivered: false,
        }
    }
}

impl KeyboardSource for ScriptedKeys {
    fn read_byte(&mut self) -> Option<u8> {
        if std::mem::take(&mut self.delivered) {
            return None;
        }
        let byte = self.slots.pop_front().flatten();
        self.delivered = byte.is_some();
        byte
    }
}

/// Audio sink that records blocks in memory, scaled by the amplifier level.
#[derive(Debug)]
pub struct WavSink {
    samples: Vec<i16>,
    level: u8,
}

impl Default for WavSink {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            level: 100,
        }
    }
}

impl WavSink {
    /// Recorded samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Writes `samples` as a 16-bit mono WAV file.
    pub fn write_wav(
        path: impl AsRef<Path>,
        samples: &[i16],
        sample_rate: u32,
    ) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()
    }
}

impl AudioSink for WavSink {
    fn write_block(&mut self, block: &[u8]) -> Result<(), PlatformError> {
        let level = i32::from(self.level);
        self.samples.extend(block.chunks_exact(2).map(|b| {
            let raw = i32::from(i16::from_le_bytes([b[0], b[1]]));
            (raw * level / 100) as i16
        }));
        Ok(())
    }

    fn set_volume(&mut self, level: u8) -> Result<(), PlatformError> {
        self.level = level.min(100);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(keys: &mut ScriptedKeys) -> Vec<u8> {
        core::iter::from_fn(|| keys.read_byte()).collect()
    }

    #[test]
    fn keys_deliver_one_per_tick() {
        let mut keys = ScriptedKeys::new("a-s", 1);
        assert!(drain(&mut keys).is_empty());
        assert_eq!(drain(&mut keys), b"a");
        assert!(drain(&mut keys).is_empty());
        assert_eq!(drain(&mut keys), b"s");
        assert!(drain(&mut keys).is_empty());
    }

    #[test]
    fn panel_walks_one_detent_per_read() {
        let mut panel = ScriptedPanel::default();
        panel.queue_turn(EncoderId::Volume, 2);
        panel.queue_turn(EncoderId::Release, -1);
        assert_eq!(panel.pending_detents(), 2);

        let first = panel.read_snapshot().unwrap();
        assert_eq!(first.encoder_pins(2), (1, 0));
        assert_eq!(first.encoder_pins(5), (0, 1));
        let second = panel.read_snapshot().unwrap();
        assert_eq!(second.encoder_pins(2), (1, 1));
        assert_eq!(second.encoder_pins(5), (0, 1));
        assert_eq!(panel.pending_detents(), 0);
    }

    #[test]
    fn queued_turns_saturate() {
        let mut panel = ScriptedPanel::default();
        panel.queue_turn(EncoderId::Volume, i32::MAX);
        panel.queue_turn(EncoderId::Volume, i32::MAX);
        panel.queue_turn(EncoderId::WaveformCutoff, i32::MIN);
        panel.queue_turn(EncoderId::WaveformCutoff, -1);
        assert_eq!(panel.pending_detents(), i32::MIN.unsigned_abs());
        assert!(panel.read_snapshot().is_ok());
    }

    #[test]
    fn sink_scales_by_level() {
        let mut sink = WavSink::default();
        let block: Vec<u8> = [1000i16, -1000]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        sink.write_block(&block).unwrap();
        sink.set_volume(50).unwrap();
        sink.write_block(&block).unwrap();
        assert_eq!(sink.samples(), &[1000, -1000, 500, -500]);
    }
}
