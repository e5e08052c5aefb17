//! Integration tests for knobsynth-platform.
//!
//! Runs the instrument against a simulated port expander on a virtual
//! millisecond clock, the way firmware would drive it from a timer.

use std::collections::VecDeque;

use knobsynth_core::{EncoderId, LfoTarget, OscId, SwitchId, TriState, Waveform};
use knobsynth_platform::{
    AudioSink, EngineConfig, Instrument, KeyboardSource, PlatformError, PortExpanderInputs,
    PortReader, PortSnapshot, Scheduler,
};
use proptest::prelude::*;

/// Detent positions, clockwise from rest.
const POSITIONS: [(u8, u8); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

/// A port expander whose knobs are turned one detent per read.
#[derive(Default)]
struct SimulatedPanel {
    snapshot: PortSnapshot,
    pending: [i32; 6],
    positions: [usize; 6],
}

impl SimulatedPanel {
    fn set_switch(&mut self, id: SwitchId, state: TriState) {
        self.snapshot.switches[id.index()] = state.pins();
    }

    fn queue_turn(&mut self, id: EncoderId, detents: i32) {
        self.pending[id.index()] += detents;
    }
}

impl PortReader for SimulatedPanel {
    fn read_snapshot(&mut self) -> Result<PortSnapshot, PlatformError> {
        for n in 0..6 {
            let remaining = self.pending[n];
            if remaining == 0 {
                continue;
            }
            let step = if remaining > 0 { 1 } else { 3 };
            self.positions[n] = (self.positions[n] + step) % 4;
            self.pending[n] -= remaining.signum();
            let (a, b) = POSITIONS[self.positions[n]];
            self.snapshot.set_encoder_pins(n, a, b);
        }
        Ok(self.snapshot)
    }
}

#[derive(Default)]
struct Recorder {
    samples: Vec<i16>,
    levels: Vec<u8>,
}

impl AudioSink for Recorder {
    fn write_block(&mut self, block: &[u8]) -> Result<(), PlatformError> {
        self.samples.extend(
            block
                .chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]])),
        );
        Ok(())
    }

    fn set_volume(&mut self, level: u8) -> Result<(), PlatformError> {
        self.levels.push(level);
        Ok(())
    }
}

#[derive(Default)]
struct TypedKeys(VecDeque<u8>);

impl KeyboardSource for TypedKeys {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

type Rig = Instrument<PortExpanderInputs<SimulatedPanel>, Recorder, TypedKeys>;

fn start(panel: SimulatedPanel) -> Rig {
    Instrument::start(
        EngineConfig::default(),
        PortExpanderInputs::new(panel),
        Recorder::default(),
        TypedKeys::default(),
    )
    .unwrap()
}

/// Runs the scheduler on a 1 ms clock from `from` until `until` and
/// returns the times the instrument ticked.
fn run(rig: &mut Rig, scheduler: &mut Scheduler, from: u64, until: u64) -> Vec<u64> {
    let mut ticks = Vec::new();
    for now in from..until {
        if scheduler.due(now) {
            rig.tick(now);
            ticks.push(now);
        }
    }
    ticks
}

fn playing_rig() -> Rig {
    let mut panel = SimulatedPanel::default();
    panel.set_switch(SwitchId::OscSelect, TriState::Up);
    panel.set_switch(SwitchId::EffectsSelect, TriState::Up);
    start(panel)
}

#[test]
fn one_second_of_audio() {
    let mut rig = playing_rig();
    let mut scheduler = Scheduler::new(rig.config().block_period_ms);

    rig.keyboard_mut().0.push_back(b'a');
    let ticks = run(&mut rig, &mut scheduler, 0, 1000);

    assert_eq!(ticks.len(), 20);
    assert!(ticks.windows(2).all(|w| w[1] - w[0] == 50));
    assert_eq!(rig.sink().samples.len(), 44_100);
}

#[test]
fn key_sounds_for_the_hold_duration() {
    let mut rig = playing_rig();
    let block = rig.config().samples_per_block();
    let hold = u64::from(rig.config().hold_ms);
    let mut scheduler = Scheduler::new(rig.config().block_period_ms);

    rig.keyboard_mut().0.push_back(b'a');
    let ticks = run(&mut rig, &mut scheduler, 0, 1000);

    let blocks: Vec<bool> = rig
        .sink()
        .samples
        .chunks(block)
        .map(|b| b.iter().any(|&s| s != 0))
        .collect();
    assert_eq!(blocks.len(), ticks.len());

    let last = blocks.iter().rposition(|&sounding| sounding).unwrap();
    assert!(blocks[..=last].iter().all(|&sounding| sounding));
    assert_eq!(last + 1, 10);
    assert!(ticks[last] < hold);
    assert!(ticks[last + 1] >= hold);
    assert!(!blocks[last + 1]);
}

#[test]
fn knob_turns_land_one_detent_per_tick() {
    let mut panel = SimulatedPanel::default();
    panel.set_switch(SwitchId::OscSelect, TriState::Up);
    panel.set_switch(SwitchId::EffectsSelect, TriState::Up);
    let mut rig = start(panel);
    let panel = rig.inputs_mut().reader_mut();
    panel.queue_turn(EncoderId::WaveformCutoff, -14);
    panel.queue_turn(EncoderId::Volume, 5);
    let mut scheduler = Scheduler::new(50);

    // Six ticks: 0, 50, ..., 250.
    run(&mut rig, &mut scheduler, 0, 50 * 5 + 1);
    assert_eq!(rig.router().encoder_value(EncoderId::Volume), 45);
    assert_eq!(rig.router().encoder_value(EncoderId::WaveformCutoff), 14);

    run(&mut rig, &mut scheduler, 50 * 5 + 1, 50 * 14 + 1);
    assert_eq!(rig.router().encoder_value(EncoderId::WaveformCutoff), 6);
    assert_eq!(rig.synth().oscillator(OscId::Osc1).waveform(), Waveform::Sine);
}

#[test]
fn switch_moves_retarget_the_lfo() {
    let mut panel = SimulatedPanel::default();
    panel.set_switch(SwitchId::EffectsSelect, TriState::Up);
    let mut rig = start(panel);
    assert_eq!(rig.synth().lfo_target(), Some(LfoTarget::LpfCutoff));

    let panel = rig.inputs_mut().reader_mut();
    panel.set_switch(SwitchId::OscSelect, TriState::Down);
    panel.set_switch(SwitchId::EffectsTarget, TriState::Up);
    let report = rig.tick(0);
    assert_eq!(report.switch_transitions, 2);
    assert_eq!(rig.synth().lfo_target(), Some(LfoTarget::Osc2Freq));
    assert!(rig.synth().oscillator(OscId::Osc2).is_enabled());
}

#[test]
fn master_level_reaches_the_sink() {
    let mut rig = start(SimulatedPanel::default());
    rig.inputs_mut()
        .reader_mut()
        .queue_turn(EncoderId::Volume, -20);
    let mut scheduler = Scheduler::new(50);
    run(&mut rig, &mut scheduler, 0, 2000);

    assert_eq!(rig.synth().master().count(), 20);
    let levels = &rig.sink().levels;
    assert_eq!(levels.first(), Some(&100));
    assert_eq!(levels.last(), Some(&67));
    assert!(levels.windows(2).all(|w| w[1] < w[0]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of knob turns leaves the accumulator at the net turn,
    /// clamped to the volume range.
    #[test]
    fn volume_follows_net_rotation(turns in prop::collection::vec(-6i32..=6, 1..8)) {
        let mut panel = SimulatedPanel::default();
        panel.set_switch(SwitchId::OscSelect, TriState::Up);
        let mut rig = start(panel);

        let mut expected = 40;
        let mut now = 0;
        for turn in turns {
            rig.inputs_mut().reader_mut().queue_turn(EncoderId::Volume, turn);
            for _ in 0..turn.unsigned_abs() {
                rig.tick(now);
                now += 50;
            }
            expected = (expected + turn).clamp(0, 50);
            prop_assert_eq!(rig.router().encoder_value(EncoderId::Volume), expected);
        }
    }
}
