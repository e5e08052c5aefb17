//! Banked routing of six encoders and four switches onto the synthesizer.
//!
//! The panel has far fewer knobs than parameters. Switches pick which bank
//! of parameters the encoders currently address:
//!
//! ```text
//! switch 0 (osc select)      Up: osc 1        Down: osc 2       Neutral: filter + master
//!   enc 0                        shift            shift             resonance
//!   enc 1                        waveform         waveform          cutoff
//!   enc 2                        volume           volume            master volume
//!
//! switch 1 (effects select)  Up: LFO          Down: amp mod     Neutral: special effects
//!   enc 3                        rate             attack            effect 0
//!   enc 4                        depth            sustain           effect 1
//!
//! switch 2 (effects target)  with switch 0, picks which LFO is live
//! switch 3 (effects config)  no parameters yet
//!
//! enc 5                      amp mod release (not banked)
//! ```
//!
//! Every bank change is an ordered save-then-load: the outgoing bank reads
//! the encoder accumulators into its parameter slots, the incoming bank
//! writes its slots back into the accumulators, then the affected encoders'
//! handlers run so derived values match the knob positions immediately.
//!
//! Handlers are a closed set of tags bound to each encoder and switch and
//! dispatched here; they run synchronously and never feed another update.

use crate::encoder::{Direction, Encoder, InvalidTransition};
use crate::lfo::{self, LfoTarget};
use crate::switch::{TriState, TriStateSwitch, Transition};
use crate::synth::{MAX_PLACEHOLDER_COUNT, OscId, Synthesizer};

/// Number of rotary encoders on the panel.
pub const ENCODER_COUNT: usize = 6;

/// Number of three-position switches on the panel.
pub const SWITCH_COUNT: usize = 4;

/// Physical encoder positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncoderId {
    /// Oscillator frequency shift / filter resonance
    ShiftResonance = 0,
    /// Oscillator waveform / filter cutoff
    WaveformCutoff = 1,
    /// Oscillator volume / master volume
    Volume = 2,
    /// LFO rate / amp-mod attack / effect 0
    RateAttack = 3,
    /// LFO depth / amp-mod sustain / effect 1
    DepthSustain = 4,
    /// Amp-mod release
    Release = 5,
}

impl EncoderId {
    /// All encoders in poll order.
    pub const ALL: [EncoderId; ENCODER_COUNT] = [
        EncoderId::ShiftResonance,
        EncoderId::WaveformCutoff,
        EncoderId::Volume,
        EncoderId::RateAttack,
        EncoderId::DepthSustain,
        EncoderId::Release,
    ];

    /// Panel index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            EncoderId::ShiftResonance => "shift/resonance",
            EncoderId::WaveformCutoff => "waveform/cutoff",
            EncoderId::Volume => "volume",
            EncoderId::RateAttack => "rate/attack",
            EncoderId::DepthSustain => "depth/sustain",
            EncoderId::Release => "release",
        }
    }
}

/// Physical switch positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchId {
    /// Oscillator 1 / oscillator 2 / filter
    OscSelect = 0,
    /// LFO / amp modulator / special effects
    EffectsSelect = 1,
    /// LFO target, combined with the oscillator select
    EffectsTarget = 2,
    /// Effects configuration
    EffectsConfig = 3,
}

impl SwitchId {
    /// All switches in poll order.
    pub const ALL: [SwitchId; SWITCH_COUNT] = [
        SwitchId::OscSelect,
        SwitchId::EffectsSelect,
        SwitchId::EffectsTarget,
        SwitchId::EffectsConfig,
    ];

    /// Panel index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            SwitchId::OscSelect => "osc-select",
            SwitchId::EffectsSelect => "effects-select",
            SwitchId::EffectsTarget => "effects-target",
            SwitchId::EffectsConfig => "effects-config",
        }
    }
}

/// Encoder change handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderHandler {
    /// Frequency shift or filter resonance, by oscillator context
    ShiftOrResonance,
    /// Waveform or filter cutoff, by oscillator context
    WaveformOrCutoff,
    /// Oscillator or master volume, by oscillator context
    Volume,
    /// First shared-bank parameter
    RateOrAttack,
    /// Second shared-bank parameter
    DepthOrSustain,
    /// Amp-mod release
    Release,
}

/// Switch transition handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchHandler {
    /// Swap the oscillator/filter bank
    OscillatorSelect,
    /// Swap the shared bank
    EffectsSelect,
    /// Retarget the LFO
    EffectsTarget,
    /// Effects configuration
    EffectsConfig,
}

/// Which parameters encoders 0-2 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscContext {
    /// One oscillator's shift, waveform and volume
    Oscillator(OscId),
    /// Filter resonance and cutoff, master volume
    Filter,
}

impl OscContext {
    /// Context selected by the oscillator-select switch.
    pub fn from_switch(state: TriState) -> Self {
        match state {
            TriState::Up => OscContext::Oscillator(OscId::Osc1),
            TriState::Down => OscContext::Oscillator(OscId::Osc2),
            TriState::Neutral => OscContext::Filter,
        }
    }
}

/// Which parameters encoders 3-4 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharedBank {
    /// Rate and depth of the live LFO
    Lfo,
    /// Amp-modulator attack and sustain
    AmpModulator,
    /// Special-effect parameters
    Effects,
}

impl SharedBank {
    /// Bank selected by the effects-select switch.
    pub fn from_switch(state: TriState) -> Self {
        match state {
            TriState::Up => SharedBank::Lfo,
            TriState::Down => SharedBank::AmpModulator,
            TriState::Neutral => SharedBank::Effects,
        }
    }

    /// Highest count for each of the two shared encoders.
    pub fn limits(self) -> (i32, i32) {
        match self {
            SharedBank::Lfo => (lfo::MAX_FREQUENCY_COUNT, lfo::MAX_AMPLITUDE_COUNT),
            SharedBank::AmpModulator | SharedBank::Effects => {
                (MAX_PLACEHOLDER_COUNT, MAX_PLACEHOLDER_COUNT)
            }
        }
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            SharedBank::Lfo => "lfo",
            SharedBank::AmpModulator => "amp-modulator",
            SharedBank::Effects => "effects",
        }
    }
}

/// One poll's worth of raw panel input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelReadings {
    /// `(pin_a, pin_b)` per encoder.
    pub encoders: [(u8, u8); ENCODER_COUNT],
    /// `(pin_up, pin_down)` per switch.
    pub switches: [(bool, bool); SWITCH_COUNT],
}

/// What a poll did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Switches that changed position.
    pub switch_transitions: u8,
    /// Encoders that moved one detent.
    pub encoder_edges: u8,
    /// Encoder readings rejected as glitches.
    pub rejected: u8,
}

/// Maps the physical controls onto the synthesizer's parameters.
#[derive(Debug, Clone)]
pub struct ParameterRouter {
    encoders: [Encoder<EncoderHandler>; ENCODER_COUNT],
    switches: [TriStateSwitch<SwitchHandler>; SWITCH_COUNT],
}

impl ParameterRouter {
    /// Creates a router with every handler bound.
    pub fn new() -> Self {
        let mut router = Self {
            encoders: core::array::from_fn(|_| Encoder::new()),
            switches: core::array::from_fn(|_| TriStateSwitch::new()),
        };

        let encoder_handlers = [
            EncoderHandler::ShiftOrResonance,
            EncoderHandler::WaveformOrCutoff,
            EncoderHandler::Volume,
            EncoderHandler::RateOrAttack,
            EncoderHandler::DepthOrSustain,
            EncoderHandler::Release,
        ];
        for (encoder, handler) in router.encoders.iter_mut().zip(encoder_handlers) {
            encoder.bind(handler);
        }

        let switch_handlers = [
            SwitchHandler::OscillatorSelect,
            SwitchHandler::EffectsSelect,
            SwitchHandler::EffectsTarget,
            SwitchHandler::EffectsConfig,
        ];
        for (switch, handler) in router.switches.iter_mut().zip(switch_handlers) {
            switch.bind(handler);
        }

        router
    }

    /// Brings the router and synthesizer in line with the panel at power-on.
    ///
    /// Switch positions and encoder pins are taken from `readings` without
    /// firing handlers, the selected banks are loaded into the encoders, and
    /// every encoder handler then runs once.
    pub fn initialize(&mut self, synth: &mut Synthesizer, readings: &PanelReadings) {
        for (switch, &(up, down)) in self.switches.iter_mut().zip(&readings.switches) {
            switch.prime(up, down);
        }
        for (encoder, &(a, b)) in self.encoders.iter_mut().zip(&readings.encoders) {
            encoder.decoder_mut().prime(a, b);
        }

        let target = LfoTarget::resolve(
            self.switch_state(SwitchId::OscSelect),
            self.switch_state(SwitchId::EffectsTarget),
        );
        synth.set_lfo_target(target);

        self.load_osc_context(synth, self.osc_context());
        self.load_shared_bank(synth, self.shared_bank(), target);
        let release = synth.amp_modulator().release;
        self.encoder_mut(EncoderId::Release).set_value(release);

        for id in EncoderId::ALL {
            self.fire(synth, id);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            osc = self.switch_state(SwitchId::OscSelect).name(),
            bank = self.shared_bank().name(),
            lfo_target = target.map_or("none", LfoTarget::name),
            "router initialized"
        );
    }

    /// Applies one poll: all switches first, then all encoders.
    pub fn poll(&mut self, synth: &mut Synthesizer, readings: &PanelReadings) -> PollReport {
        let mut report = PollReport::default();

        for id in SwitchId::ALL {
            let (up, down) = readings.switches[id.index()];
            if self.switch_input(synth, id, up, down).is_some() {
                report.switch_transitions += 1;
            }
        }

        for id in EncoderId::ALL {
            let (a, b) = readings.encoders[id.index()];
            match self.encoder_input(synth, id, a, b) {
                Ok(Some(_)) => report.encoder_edges += 1,
                Ok(None) => {}
                Err(_) => report.rejected += 1,
            }
        }

        report
    }

    /// Feeds one switch reading and runs its handler on a change.
    pub fn switch_input(
        &mut self,
        synth: &mut Synthesizer,
        id: SwitchId,
        pin_up: bool,
        pin_down: bool,
    ) -> Option<Transition> {
        let switch = &mut self.switches[id.index()];
        let transition = switch.update(pin_up, pin_down)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            switch = id.name(),
            from = transition.previous.name(),
            to = transition.current.name(),
            "switch moved"
        );

        if let Some(handler) = switch.handler() {
            self.dispatch_switch(synth, handler, transition);
        }
        Some(transition)
    }

    /// Feeds one encoder reading and runs its handler after a valid edge.
    ///
    /// Glitches are logged and leave all state unchanged.
    pub fn encoder_input(
        &mut self,
        synth: &mut Synthesizer,
        id: EncoderId,
        pin_a: u8,
        pin_b: u8,
    ) -> Result<Option<Direction>, InvalidTransition> {
        let encoder = &mut self.encoders[id.index()];
        let direction = match encoder.update(pin_a, pin_b) {
            Ok(direction) => direction,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(encoder = id.name(), "{err}");
                return Err(err);
            }
        };

        if direction.is_some() {
            if let Some(handler) = encoder.handler() {
                self.dispatch_encoder(synth, handler);
            }
        }
        Ok(direction)
    }

    /// Current accumulator value of an encoder.
    #[inline]
    pub fn encoder_value(&self, id: EncoderId) -> i32 {
        self.encoders[id.index()].value()
    }

    /// Current position of a switch.
    #[inline]
    pub fn switch_state(&self, id: SwitchId) -> TriState {
        self.switches[id.index()].state()
    }

    /// Bank addressed by encoders 0-2.
    pub fn osc_context(&self) -> OscContext {
        OscContext::from_switch(self.switch_state(SwitchId::OscSelect))
    }

    /// Bank addressed by encoders 3-4.
    pub fn shared_bank(&self) -> SharedBank {
        SharedBank::from_switch(self.switch_state(SwitchId::EffectsSelect))
    }

    fn encoder_mut(&mut self, id: EncoderId) -> &mut Encoder<EncoderHandler> {
        &mut self.encoders[id.index()]
    }

    /// Runs an encoder's bound handler as if it had just moved.
    fn fire(&mut self, synth: &mut Synthesizer, id: EncoderId) {
        if let Some(handler) = self.encoders[id.index()].handler() {
            self.dispatch_encoder(synth, handler);
        }
    }

    fn dispatch_switch(
        &mut self,
        synth: &mut Synthesizer,
        handler: SwitchHandler,
        transition: Transition,
    ) {
        match handler {
            SwitchHandler::OscillatorSelect => self.on_oscillator_select(synth, transition),
            SwitchHandler::EffectsSelect => self.on_effects_select(synth, transition),
            SwitchHandler::EffectsTarget => {
                let target =
                    LfoTarget::resolve(self.switch_state(SwitchId::OscSelect), transition.current);
                self.retarget_lfo(synth, target);
            }
            SwitchHandler::EffectsConfig => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    position = transition.current.name(),
                    "effects configuration has no parameters"
                );
            }
        }
    }

    fn on_oscillator_select(&mut self, synth: &mut Synthesizer, transition: Transition) {
        self.save_osc_context(synth, OscContext::from_switch(transition.previous));
        let context = OscContext::from_switch(transition.current);
        self.load_osc_context(synth, context);

        let target =
            LfoTarget::resolve(transition.current, self.switch_state(SwitchId::EffectsTarget));
        self.retarget_lfo(synth, target);

        self.fire(synth, EncoderId::Volume);
        self.fire(synth, EncoderId::WaveformCutoff);
        self.fire(synth, EncoderId::ShiftResonance);
    }

    fn on_effects_select(&mut self, synth: &mut Synthesizer, transition: Transition) {
        let target = synth.lfo_target();
        self.save_shared_bank(synth, SharedBank::from_switch(transition.previous), target);
        let bank = SharedBank::from_switch(transition.current);
        self.load_shared_bank(synth, bank, target);

        #[cfg(feature = "tracing")]
        tracing::info!(bank = bank.name(), "shared encoders rebanked");

        self.fire(synth, EncoderId::RateAttack);
        self.fire(synth, EncoderId::DepthSustain);

        let resolved = LfoTarget::resolve(
            self.switch_state(SwitchId::OscSelect),
            self.switch_state(SwitchId::EffectsTarget),
        );
        self.retarget_lfo(synth, resolved);
    }

    /// Moves the live LFO to `target`.
    ///
    /// While the shared encoders address the LFO bank, the outgoing target's
    /// rate/depth are saved and the incoming target's loaded and applied.
    /// In the other banks only the target pointer moves.
    fn retarget_lfo(&mut self, synth: &mut Synthesizer, target: Option<LfoTarget>) {
        let previous = synth.lfo_target();
        if previous == target {
            return;
        }

        if self.shared_bank() == SharedBank::Lfo {
            self.save_shared_bank(synth, SharedBank::Lfo, previous);
            synth.set_lfo_target(target);
            self.load_shared_bank(synth, SharedBank::Lfo, target);
            self.fire(synth, EncoderId::RateAttack);
            self.fire(synth, EncoderId::DepthSustain);
        } else {
            synth.set_lfo_target(target);
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            from = previous.map_or("none", LfoTarget::name),
            to = target.map_or("none", LfoTarget::name),
            "lfo target changed"
        );
    }

    fn save_osc_context(&self, synth: &mut Synthesizer, context: OscContext) {
        let shift = self.encoder_value(EncoderId::ShiftResonance);
        let wave = self.encoder_value(EncoderId::WaveformCutoff);
        let volume = self.encoder_value(EncoderId::Volume);

        match context {
            OscContext::Oscillator(id) => {
                let osc = synth.oscillator_mut(id);
                osc.apply_shift_count(shift);
                osc.apply_waveform_count(wave);
                osc.apply_volume_count(volume);
            }
            OscContext::Filter => {
                let filter = synth.filter_mut();
                filter.set_resonance_count(shift);
                filter.set_cutoff_count(wave);
                synth.master_mut().apply_count(volume);
            }
        }
    }

    fn load_osc_context(&mut self, synth: &mut Synthesizer, context: OscContext) {
        let (shift, wave, volume) = match context {
            OscContext::Oscillator(id) => {
                let osc = synth.oscillator_mut(id);
                osc.set_enabled(true);
                (osc.shift_count(), osc.wave_count(), osc.volume_count())
            }
            OscContext::Filter => (
                synth.filter().resonance_count(),
                synth.filter().cutoff_count(),
                synth.master().count(),
            ),
        };

        self.encoder_mut(EncoderId::ShiftResonance).set_value(shift);
        self.encoder_mut(EncoderId::WaveformCutoff).set_value(wave);
        self.encoder_mut(EncoderId::Volume).set_value(volume);
    }

    fn save_shared_bank(
        &self,
        synth: &mut Synthesizer,
        bank: SharedBank,
        target: Option<LfoTarget>,
    ) {
        let first = self.encoder_value(EncoderId::RateAttack);
        let second = self.encoder_value(EncoderId::DepthSustain);

        match bank {
            SharedBank::Lfo => match target {
                Some(target) => {
                    let lfo = synth.lfo_mut(target);
                    lfo.set_frequency_count(first);
                    lfo.set_amplitude_count(second);
                }
                None => synth.set_unassigned_lfo_counts([first, second]),
            },
            SharedBank::AmpModulator => {
                let am = synth.amp_modulator_mut();
                am.attack = first;
                am.sustain = second;
            }
            SharedBank::Effects => synth.set_effect_counts([first, second]),
        }
    }

    fn load_shared_bank(
        &mut self,
        synth: &Synthesizer,
        bank: SharedBank,
        target: Option<LfoTarget>,
    ) {
        let [first, second] = match bank {
            SharedBank::Lfo => match target {
                Some(target) => {
                    let lfo = synth.lfo(target);
                    [lfo.frequency_count(), lfo.amplitude_count()]
                }
                None => synth.unassigned_lfo_counts(),
            },
            SharedBank::AmpModulator => {
                let am = synth.amp_modulator();
                [am.attack, am.sustain]
            }
            SharedBank::Effects => synth.effect_counts(),
        };

        self.encoder_mut(EncoderId::RateAttack).set_value(first);
        self.encoder_mut(EncoderId::DepthSustain).set_value(second);
    }

    fn dispatch_encoder(&mut self, synth: &mut Synthesizer, handler: EncoderHandler) {
        match handler {
            EncoderHandler::ShiftOrResonance => {
                let raw = self.encoder_value(EncoderId::ShiftResonance);
                let stored = match self.osc_context() {
                    OscContext::Oscillator(id) => {
                        let count = synth.oscillator_mut(id).apply_shift_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            osc = id.name(),
                            shift = synth.oscillator(id).shift(),
                            count,
                            "frequency shift"
                        );
                        count
                    }
                    OscContext::Filter => {
                        let count = synth.filter_mut().set_resonance_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(count, "filter resonance (not applied)");
                        count
                    }
                };
                self.encoder_mut(EncoderId::ShiftResonance).set_value(stored);
            }
            EncoderHandler::WaveformOrCutoff => {
                let raw = self.encoder_value(EncoderId::WaveformCutoff);
                let stored = match self.osc_context() {
                    OscContext::Oscillator(id) => {
                        let count = synth.oscillator_mut(id).apply_waveform_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            osc = id.name(),
                            waveform = synth.oscillator(id).waveform().name(),
                            count,
                            "waveform"
                        );
                        count
                    }
                    OscContext::Filter => {
                        let count = synth.filter_mut().set_cutoff_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(hz = synth.filter().cutoff_hz(), count, "filter cutoff");
                        count
                    }
                };
                self.encoder_mut(EncoderId::WaveformCutoff).set_value(stored);
            }
            EncoderHandler::Volume => {
                let raw = self.encoder_value(EncoderId::Volume);
                let stored = match self.osc_context() {
                    OscContext::Oscillator(id) => {
                        let count = synth.oscillator_mut(id).apply_volume_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            osc = id.name(),
                            volume = synth.oscillator(id).volume(),
                            count,
                            "oscillator volume"
                        );
                        count
                    }
                    OscContext::Filter => {
                        let count = synth.master_mut().apply_count(raw);
                        #[cfg(feature = "tracing")]
                        tracing::debug!(level = synth.master().level(), count, "master volume");
                        count
                    }
                };
                self.encoder_mut(EncoderId::Volume).set_value(stored);
            }
            EncoderHandler::RateOrAttack | EncoderHandler::DepthOrSustain => {
                let bank = self.shared_bank();
                let (first_max, second_max) = bank.limits();
                let (id, max) = if handler == EncoderHandler::RateOrAttack {
                    (EncoderId::RateAttack, first_max)
                } else {
                    (EncoderId::DepthSustain, second_max)
                };
                let raw = self.encoder_value(id);
                self.encoder_mut(id).set_clamped(raw, 0, max);
                let target = synth.lfo_target();
                self.save_shared_bank(synth, bank, target);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    bank = bank.name(),
                    encoder = id.name(),
                    count = self.encoder_value(id),
                    lfo_target = target.map_or("none", LfoTarget::name),
                    "shared parameter"
                );
            }
            EncoderHandler::Release => {
                let raw = self.encoder_value(EncoderId::Release);
                let count = self
                    .encoder_mut(EncoderId::Release)
                    .set_clamped(raw, 0, MAX_PLACEHOLDER_COUNT);
                synth.amp_modulator_mut().release = count;
                #[cfg(feature = "tracing")]
                tracing::debug!(count, "amp-mod release (not applied)");
            }
        }
    }
}

impl Default for ParameterRouter {
    fn default() -> Self {
        Self::new()
    }
}
