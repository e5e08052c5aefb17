//! Property-based tests for knobsynth-core.
//!
//! Covers quadrature decoding under arbitrary rotation sequences, bank
//! save/restore under arbitrary switch and encoder activity, and filter and
//! block-output bounds for random parameter choices.

use knobsynth_core::{
    BlockSynthesizer, EncoderId, EngineConfig, LowPassFilter, OscId, PanelReadings,
    ParameterRouter, Pitch, QuadratureDecoder, Synthesizer, SwitchId, TriState, VoicePool,
};
use proptest::prelude::*;

const POSITIONS: [(u8, u8); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

fn tri_state() -> impl Strategy<Value = TriState> {
    prop_oneof![
        Just(TriState::Down),
        Just(TriState::Neutral),
        Just(TriState::Up)
    ]
}

/// One panel action: turn an encoder by a few detents or move a switch.
#[derive(Debug, Clone)]
enum Action {
    Turn(usize, i32),
    Flip(usize, TriState),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..6, -8i32..=8).prop_map(|(e, d)| Action::Turn(e, d)),
        (0usize..3, tri_state()).prop_map(|(s, t)| Action::Flip(s, t)),
    ]
}

struct Panel {
    synth: Synthesizer,
    router: ParameterRouter,
    readings: PanelReadings,
    detents: [usize; 6],
}

impl Panel {
    fn new(osc: TriState, effects: TriState, target: TriState) -> Self {
        let mut readings = PanelReadings::default();
        readings.switches[0] = osc.pins();
        readings.switches[1] = effects.pins();
        readings.switches[2] = target.pins();
        let mut synth = Synthesizer::new(44100.0);
        let mut router = ParameterRouter::new();
        router.initialize(&mut synth, &readings);
        Self {
            synth,
            router,
            readings,
            detents: [0; 6],
        }
    }

    fn apply(&mut self, action: &Action) {
        match *action {
            Action::Turn(encoder, detents) => {
                let step = if detents > 0 { 1 } else { 3 };
                for _ in 0..detents.unsigned_abs() {
                    let pos = &mut self.detents[encoder];
                    *pos = (*pos + step) % 4;
                    self.readings.encoders[encoder] = POSITIONS[*pos];
                    self.router.poll(&mut self.synth, &self.readings);
                }
            }
            Action::Flip(switch, state) => {
                self.readings.switches[switch] = state.pins();
                self.router.poll(&mut self.synth, &self.readings);
            }
        }
    }

    fn values(&self) -> [i32; 6] {
        EncoderId::ALL.map(|id| self.router.encoder_value(id))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The accumulator equals the net number of valid edges, whatever the
    /// order of clockwise and counter-clockwise steps.
    #[test]
    fn decoder_counts_net_rotation(steps in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut decoder = QuadratureDecoder::new();
        let mut pos = 0usize;
        let mut expected = 0i32;
        for clockwise in steps {
            pos = if clockwise { (pos + 1) % 4 } else { (pos + 3) % 4 };
            expected += if clockwise { 1 } else { -1 };
            let (a, b) = POSITIONS[pos];
            prop_assert!(decoder.update(a, b).unwrap().is_some());
        }
        prop_assert_eq!(decoder.value(), expected);
    }

    /// A double-bit change is always rejected and never moves the value.
    #[test]
    fn decoder_rejects_double_changes(turns in 0i32..20) {
        let mut decoder = QuadratureDecoder::new();
        let mut pos = 0usize;
        for _ in 0..turns {
            pos = (pos + 1) % 4;
            let (a, b) = POSITIONS[pos];
            decoder.update(a, b).unwrap();
        }
        let (a, b) = POSITIONS[pos];
        let before = decoder.value();
        prop_assert!(decoder.update(a ^ 1, b ^ 1).is_err());
        prop_assert_eq!(decoder.value(), before);
        prop_assert_eq!(decoder.pins(), (a, b));
    }

    /// Leaving a bank and coming straight back restores every encoder.
    #[test]
    fn context_round_trip_restores_encoders(
        osc in tri_state(),
        effects in tri_state(),
        target in tri_state(),
        actions in prop::collection::vec(action(), 0..24),
        away in tri_state(),
        switch in 0usize..3,
    ) {
        let mut panel = Panel::new(osc, effects, target);
        for action in &actions {
            panel.apply(action);
        }
        let home = panel.router.switch_state(SwitchId::ALL[switch]);
        prop_assume!(away != home);

        let before = panel.values();
        panel.apply(&Action::Flip(switch, away));
        panel.apply(&Action::Flip(switch, home));
        prop_assert_eq!(panel.values(), before);
    }

    /// Encoder values never leave their parameter ranges.
    #[test]
    fn encoder_values_stay_in_range(
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let mut panel = Panel::new(TriState::Up, TriState::Up, TriState::Up);
        for action in &actions {
            panel.apply(action);
        }
        let v = panel.values();
        prop_assert!((0..=96).contains(&v[0]));
        prop_assert!((0..=96).contains(&v[1]));
        prop_assert!((0..=50).contains(&v[2]));
        prop_assert!((0..=99).contains(&v[3]));
        prop_assert!((0..=99).contains(&v[4]));
        prop_assert!((0..=99).contains(&v[5]));
    }

    /// The filter stays finite for any cutoff count and bounded input.
    #[test]
    fn filter_is_stable(
        count in 0i32..=96,
        offset in -20.0f32..20.0,
        input in prop::collection::vec(-65536.0f32..65536.0, 64..512),
    ) {
        let mut lpf = LowPassFilter::new(44100.0);
        lpf.set_cutoff_count(count);
        lpf.modulate(offset);
        for &x in &input {
            let y = lpf.process(x);
            prop_assert!(y.is_finite(), "count {} produced {}", count, y);
        }
    }

    /// Rendered blocks always have the configured length and never contain
    /// -32768.
    #[test]
    fn blocks_are_bounded(
        keys in prop::collection::vec(any::<u8>(), 0..6),
        volume in 0i32..=50,
        wave in 0i32..32,
    ) {
        let config = EngineConfig::default();
        let mut synth = Synthesizer::new(config.sample_rate_hz());
        for osc in OscId::ALL {
            synth.oscillator_mut(osc).apply_volume_count(volume);
            synth.oscillator_mut(osc).apply_waveform_count(wave);
        }
        let mut pool: VoicePool = VoicePool::new(config.hold_ms);
        for key in keys {
            pool.press(Pitch::from_byte(key), 0);
        }
        let mut renderer = BlockSynthesizer::new(config);
        let mut block = vec![0u8; renderer.block_bytes()];
        renderer.render(&mut synth, &mut pool, 0, &mut block);

        prop_assert_eq!(block.len(), 4410);
        for frame in block.chunks_exact(2) {
            prop_assert!(i16::from_le_bytes([frame[0], frame[1]]) != i16::MIN);
        }
    }
}
