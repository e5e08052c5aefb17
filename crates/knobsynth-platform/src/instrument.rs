//! The instrument: engine state plus collaborators, advanced one tick at a
//! time.
//!
//! Everything mutable (router, synthesizer, voice pool, block buffer) is
//! owned here and touched only from [`Instrument::tick`], so the loop needs
//! no locking. Each tick runs to completion in a fixed order:
//!
//! 1. poll the input bank (one retry on [`PlatformError::NotReady`])
//! 2. switches, then encoders
//! 3. drain the keyboard into the voice pool
//! 4. expire voices and render one block
//! 5. write the block (one retry on [`PlatformError::NotReady`])
//! 6. forward a changed master level to the sink
//!
//! A failed poll skips the rest of the tick; the next tick starts fresh.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use knobsynth_core::{
    BlockSynthesizer, EngineConfig, PanelReadings, ParameterRouter, Pitch, PressOutcome,
    Synthesizer, VoicePool,
};

use crate::{AudioSink, InputBank, KeyboardSource, PlatformError};

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Input could not be read; nothing else ran.
    pub skipped: bool,
    /// Switches that changed position.
    pub switch_transitions: u8,
    /// Encoder detents applied.
    pub encoder_edges: u8,
    /// Encoder readings rejected as glitches.
    pub rejected: u8,
    /// Key presses that claimed or refreshed a voice.
    pub presses: u16,
    /// Key presses dropped because every voice was busy.
    pub dropped_presses: u16,
    /// Voices sounding in this tick's block.
    pub active_voices: usize,
    /// The block reached the sink.
    pub block_written: bool,
    /// The amplifier level was updated.
    pub volume_sent: bool,
}

/// A running synthesizer bound to its inputs and output.
#[derive(Debug)]
pub struct Instrument<I, S, K> {
    config: EngineConfig,
    router: ParameterRouter,
    synth: Synthesizer,
    pool: VoicePool,
    renderer: BlockSynthesizer,
    block: Vec<u8>,
    inputs: I,
    sink: S,
    keyboard: K,
    /// Last level the sink accepted.
    sent_level: u8,
}

impl<I: InputBank, S: AudioSink, K: KeyboardSource> Instrument<I, S, K> {
    /// Reads the panel, initializes the router, and sets the amplifier.
    ///
    /// Any collaborator failure here is fatal.
    pub fn start(
        config: EngineConfig,
        mut inputs: I,
        mut sink: S,
        keyboard: K,
    ) -> Result<Self, PlatformError> {
        let readings = inputs.poll().map_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "initial input read failed");
            PlatformError::Initialization("input bank unavailable")
        })?;

        let mut synth = Synthesizer::new(config.sample_rate_hz());
        let mut router = ParameterRouter::new();
        router.initialize(&mut synth, &readings);

        let level = synth.master().level();
        sink.set_volume(level).map_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "initial volume write failed");
            PlatformError::Initialization("audio sink unavailable")
        })?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            sample_rate = config.sample_rate,
            block_period_ms = config.block_period_ms,
            block_bytes = config.block_bytes(),
            level,
            "instrument started"
        );

        Ok(Self {
            config,
            router,
            synth,
            pool: VoicePool::new(config.hold_ms),
            renderer: BlockSynthesizer::new(config),
            block: vec![0; config.block_bytes()],
            inputs,
            sink,
            keyboard,
            sent_level: level,
        })
    }

    /// Runs one control period at `now_ms` on a monotonic clock.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();

        let Some(readings) = self.poll_inputs() else {
            report.skipped = true;
            return report;
        };

        let poll = self.router.poll(&mut self.synth, &readings);
        report.switch_transitions = poll.switch_transitions;
        report.encoder_edges = poll.encoder_edges;
        report.rejected = poll.rejected;

        while let Some(byte) = self.keyboard.read_byte() {
            match self.pool.press(Pitch::from_byte(byte), now_ms) {
                PressOutcome::Dropped => report.dropped_presses += 1,
                PressOutcome::Allocated(_) | PressOutcome::Refreshed(_) => report.presses += 1,
            }
        }

        let stats = self
            .renderer
            .render(&mut self.synth, &mut self.pool, now_ms, &mut self.block);
        report.active_voices = stats.active_voices;

        report.block_written = self.write_block();
        report.volume_sent = self.forward_volume();
        report
    }

    fn poll_inputs(&mut self) -> Option<PanelReadings> {
        match self.inputs.poll() {
            Ok(readings) => return Some(readings),
            Err(err) if err.is_transient() => {}
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "input read failed, tick skipped");
                return None;
            }
        }
        match self.inputs.poll() {
            Ok(readings) => Some(readings),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "input read failed after retry, tick skipped");
                None
            }
        }
    }

    fn write_block(&mut self) -> bool {
        match self.sink.write_block(&self.block) {
            Ok(()) => return true,
            Err(err) if err.is_transient() => {
                #[cfg(feature = "tracing")]
                tracing::warn!("audio sink not ready, retrying block");
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "audio write failed, block dropped");
                return false;
            }
        }
        match self.sink.write_block(&self.block) {
            Ok(()) => true,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "audio write failed after retry, block dropped");
                false
            }
        }
    }

    fn forward_volume(&mut self) -> bool {
        let level = self.synth.master().level();
        if level == self.sent_level {
            return false;
        }
        match self.sink.set_volume(level) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(from = self.sent_level, to = level, "amplifier level");
                self.sent_level = level;
                true
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, level, "volume write failed, will retry");
                false
            }
        }
    }
}

impl<I, S, K> Instrument<I, S, K> {
    /// Timing the instrument runs at.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Synthesizer parameters.
    #[inline]
    pub fn synth(&self) -> &Synthesizer {
        &self.synth
    }

    /// Control routing state.
    #[inline]
    pub fn router(&self) -> &ParameterRouter {
        &self.router
    }

    /// Voice slots.
    #[inline]
    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    /// The last rendered block.
    #[inline]
    pub fn block(&self) -> &[u8] {
        &self.block
    }

    /// The input bank.
    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    /// The audio sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the audio sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The keyboard source.
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// Stops the instrument and returns its collaborators.
    pub fn into_parts(self) -> (I, S, K) {
        (self.inputs, self.sink, self.keyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knobsynth_core::{EncoderId, OscId, SwitchId, TriState};
    use std::collections::VecDeque;

    /// Returns queued results, then repeats the last good reading.
    #[derive(Default)]
    struct ScriptedInputs {
        current: PanelReadings,
        failures: VecDeque<PlatformError>,
        polls: usize,
    }

    impl InputBank for ScriptedInputs {
        fn poll(&mut self) -> Result<PanelReadings, PlatformError> {
            self.polls += 1;
            match self.failures.pop_front() {
                Some(err) => Err(err),
                None => Ok(self.current),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        blocks: Vec<Vec<u8>>,
        levels: Vec<u8>,
        write_failures: VecDeque<PlatformError>,
        volume_failures: VecDeque<PlatformError>,
    }

    impl AudioSink for RecordingSink {
        fn write_block(&mut self, block: &[u8]) -> Result<(), PlatformError> {
            if let Some(err) = self.write_failures.pop_front() {
                return Err(err);
            }
            self.blocks.push(block.to_vec());
            Ok(())
        }

        fn set_volume(&mut self, level: u8) -> Result<(), PlatformError> {
            if let Some(err) = self.volume_failures.pop_front() {
                return Err(err);
            }
            self.levels.push(level);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Keys(VecDeque<u8>);

    impl KeyboardSource for Keys {
        fn read_byte(&mut self) -> Option<u8> {
            self.0.pop_front()
        }
    }

    type TestInstrument = Instrument<ScriptedInputs, RecordingSink, Keys>;

    fn osc1_panel() -> PanelReadings {
        let mut readings = PanelReadings::default();
        readings.switches[SwitchId::OscSelect.index()] = TriState::Up.pins();
        readings.switches[SwitchId::EffectsSelect.index()] = TriState::Up.pins();
        readings
    }

    fn started() -> TestInstrument {
        let inputs = ScriptedInputs {
            current: osc1_panel(),
            ..ScriptedInputs::default()
        };
        Instrument::start(
            EngineConfig::default(),
            inputs,
            RecordingSink::default(),
            Keys::default(),
        )
        .unwrap()
    }

    #[test]
    fn start_sets_initial_volume() {
        let instrument = started();
        assert_eq!(instrument.sink().levels, [100]);
        assert!(instrument.synth().oscillator(OscId::Osc1).is_enabled());
        assert_eq!(instrument.block().len(), 4410);
    }

    #[test]
    fn start_fails_without_inputs() {
        let inputs = ScriptedInputs {
            failures: VecDeque::from([PlatformError::NotReady]),
            ..ScriptedInputs::default()
        };
        let result = Instrument::start(
            EngineConfig::default(),
            inputs,
            RecordingSink::default(),
            Keys::default(),
        );
        assert!(matches!(result, Err(PlatformError::Initialization(_))));
    }

    #[test]
    fn start_fails_without_sink() {
        let sink = RecordingSink {
            volume_failures: VecDeque::from([PlatformError::Bus { code: 2 }]),
            ..RecordingSink::default()
        };
        let result = Instrument::start(
            EngineConfig::default(),
            ScriptedInputs::default(),
            sink,
            Keys::default(),
        );
        assert_eq!(
            result.err(),
            Some(PlatformError::Initialization("audio sink unavailable"))
        );
    }

    #[test]
    fn key_press_is_heard_in_same_tick() {
        let mut instrument = started();
        instrument.keyboard_mut().0.push_back(b'a');
        let report = instrument.tick(0);
        assert_eq!(report.presses, 1);
        assert_eq!(report.active_voices, 1);
        assert!(report.block_written);
        assert!(instrument.sink().blocks[0].iter().any(|&b| b != 0));
    }

    #[test]
    fn fifth_key_is_dropped() {
        let mut instrument = started();
        instrument.keyboard_mut().0.extend(*b"asdfg");
        let report = instrument.tick(0);
        assert_eq!(report.presses, 4);
        assert_eq!(report.dropped_presses, 1);
    }

    #[test]
    fn voice_expires_after_hold() {
        let mut instrument = started();
        instrument.keyboard_mut().0.push_back(b'a');
        assert_eq!(instrument.tick(0).active_voices, 1);
        assert_eq!(instrument.tick(450).active_voices, 1);
        assert_eq!(instrument.tick(500).active_voices, 0);
        assert!(instrument.sink().blocks[2].iter().all(|&b| b == 0));
    }

    #[test]
    fn not_ready_input_is_retried_once() {
        let mut instrument = started();
        instrument.inputs_mut().failures.push_back(PlatformError::NotReady);
        let report = instrument.tick(0);
        assert!(!report.skipped);
        assert!(report.block_written);

        let polls = instrument.inputs_mut().polls;
        instrument
            .inputs_mut()
            .failures
            .extend([PlatformError::NotReady, PlatformError::NotReady]);
        let report = instrument.tick(50);
        assert!(report.skipped);
        assert!(!report.block_written);
        assert_eq!(instrument.inputs_mut().polls, polls + 2);
        assert_eq!(instrument.sink().blocks.len(), 1);
    }

    #[test]
    fn bus_error_skips_without_retry() {
        let mut instrument = started();
        let polls = instrument.inputs_mut().polls;
        instrument
            .inputs_mut()
            .failures
            .push_back(PlatformError::Bus { code: 9 });
        assert!(instrument.tick(0).skipped);
        assert_eq!(instrument.inputs_mut().polls, polls + 1);
        // Self-heals on the next tick.
        assert!(!instrument.tick(50).skipped);
    }

    #[test]
    fn write_is_retried_once() {
        let mut instrument = started();
        instrument
            .sink_mut()
            .write_failures
            .push_back(PlatformError::NotReady);
        assert!(instrument.tick(0).block_written);

        instrument
            .sink_mut()
            .write_failures
            .extend([PlatformError::NotReady, PlatformError::NotReady]);
        assert!(!instrument.tick(50).block_written);
        assert_eq!(instrument.sink().blocks.len(), 1);
    }

    /// Pin pairs for counter-clockwise detents starting from rest.
    const CCW: [(u8, u8); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

    fn filter_context() -> TestInstrument {
        Instrument::start(
            EngineConfig::default(),
            ScriptedInputs::default(),
            RecordingSink::default(),
            Keys::default(),
        )
        .unwrap()
    }

    #[test]
    fn master_volume_is_forwarded_on_change() {
        // All switches neutral: encoder 2 drives the master volume.
        let mut instrument = filter_context();
        assert!(!instrument.tick(0).volume_sent);

        // Counts 39..37 still map to the 100 ceiling; 36 gives 99.
        let mut sent = Vec::new();
        for (n, pins) in CCW.into_iter().enumerate() {
            instrument.inputs_mut().current.encoders[EncoderId::Volume.index()] = pins;
            let report = instrument.tick(50 * (n as u64 + 1));
            assert_eq!(report.encoder_edges, 1);
            sent.push(report.volume_sent);
        }
        assert_eq!(sent, [false, false, false, true]);
        assert_eq!(instrument.synth().master().count(), 36);
        assert_eq!(instrument.sink().levels, [100, 99]);
    }

    #[test]
    fn failed_volume_write_is_retried_next_tick() {
        let mut instrument = filter_context();
        for (n, pins) in CCW.into_iter().take(3).enumerate() {
            instrument.inputs_mut().current.encoders[EncoderId::Volume.index()] = pins;
            instrument.tick(50 * n as u64);
        }
        instrument
            .sink_mut()
            .volume_failures
            .push_back(PlatformError::Bus { code: 1 });
        instrument.inputs_mut().current.encoders[EncoderId::Volume.index()] = CCW[3];
        assert!(!instrument.tick(150).volume_sent);
        assert!(instrument.tick(200).volume_sent);
        assert_eq!(instrument.sink().levels, [100, 99]);
    }

    #[test]
    fn glitches_are_counted_not_fatal() {
        let mut instrument = started();
        instrument.inputs_mut().current.encoders[0] = (1, 1);
        let report = instrument.tick(0);
        assert_eq!(report.rejected, 1);
        assert!(report.block_written);
    }
}
