//! Render a scripted playing session to a WAV file.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use knobsynth_core::{EncoderId, SwitchId, TriState};
use knobsynth_platform::{Instrument, PortExpanderInputs, Scheduler};

use crate::config::SynthConfig;
use crate::session::{ScriptedKeys, ScriptedPanel, WavSink};

/// Switch position as given on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Position {
    /// Lever up
    Up,
    /// Lever down
    Down,
    /// Centered
    #[default]
    Neutral,
}

impl From<Position> for TriState {
    fn from(position: Position) -> Self {
        match position {
            Position::Up => TriState::Up,
            Position::Down => TriState::Down,
            Position::Neutral => TriState::Neutral,
        }
    }
}

/// Play keys through the control loop and record the output.
#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    pub output: PathBuf,

    /// Keys to type, one per block period ('-' rests)
    #[arg(short, long, default_value = "")]
    pub keys: String,

    /// Oscillator-select switch
    #[arg(long, value_enum, default_value_t = Position::Up)]
    pub osc: Position,

    /// Effects-target switch
    #[arg(long, value_enum, default_value_t = Position::Neutral)]
    pub target: Position,

    /// Effects-select switch
    #[arg(long, value_enum, default_value_t = Position::Up)]
    pub effects: Position,

    /// Number of blocks to record after the knobs settle (default: until the last note ends)
    #[arg(long)]
    pub ticks: Option<usize>,

    /// TOML file with sample_rate, block_period_ms and hold_ms
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Knob turn before playing, as ENCODER:DETENTS (e.g. volume:-5, 1:-14)
    #[arg(long = "turn", value_parser = parse_turn)]
    pub turns: Vec<(EncoderId, i32)>,
}

/// Largest accepted turn, in detents either way. Sweeps any parameter end
/// to end.
pub const MAX_TURN_DETENTS: i32 = 128;

/// Parse `ENCODER:DETENTS` for clap's `value_parser`.
///
/// The encoder is its panel index `0..=5` or one of `shift`, `resonance`,
/// `waveform`, `cutoff`, `volume`, `rate`, `attack`, `depth`, `sustain`,
/// `release`. Turns are limited to [`MAX_TURN_DETENTS`].
pub fn parse_turn(s: &str) -> Result<(EncoderId, i32), String> {
    let (encoder, detents) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid turn: '{s}' (expected ENCODER:DETENTS)"))?;

    let id = match encoder.trim().to_ascii_lowercase().as_str() {
        "0" | "shift" | "resonance" => EncoderId::ShiftResonance,
        "1" | "waveform" | "cutoff" => EncoderId::WaveformCutoff,
        "2" | "volume" => EncoderId::Volume,
        "3" | "rate" | "attack" => EncoderId::RateAttack,
        "4" | "depth" | "sustain" => EncoderId::DepthSustain,
        "5" | "release" => EncoderId::Release,
        other => return Err(format!("Unknown encoder '{other}'")),
    };
    let detents = detents
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("Invalid detent count '{detents}': {e}"))?;
    if detents.unsigned_abs() > MAX_TURN_DETENTS.unsigned_abs() {
        return Err(format!(
            "Turn of {detents} detents is outside -{MAX_TURN_DETENTS}..={MAX_TURN_DETENTS}"
        ));
    }
    Ok((id, detents))
}

/// Run the render command.
pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SynthConfig::load(path)?,
        None => SynthConfig::default(),
    };
    let engine = config.engine();

    let mut panel = ScriptedPanel::default();
    panel.set_switch(SwitchId::OscSelect, args.osc.into());
    panel.set_switch(SwitchId::EffectsSelect, args.effects.into());
    panel.set_switch(SwitchId::EffectsTarget, args.target.into());
    panel.set_switch(SwitchId::EffectsConfig, TriState::Neutral);

    let mut instrument = Instrument::start(
        engine,
        PortExpanderInputs::new(panel),
        WavSink::default(),
        ScriptedKeys::default(),
    )?;

    // Knobs settle one detent per tick before the first key is typed.
    let panel = instrument.inputs_mut().reader_mut();
    for &(id, detents) in &args.turns {
        panel.queue_turn(id, detents);
    }
    let lead_in = panel.pending_detents() as usize;
    *instrument.keyboard_mut() = ScriptedKeys::new(&args.keys, lead_in);

    // Blocks from the last key to the first silent block after its hold.
    let tail = engine.hold_ms.div_ceil(engine.block_period_ms) as usize;
    let recorded = args.ticks.unwrap_or(args.keys.len() + tail);
    let total = lead_in + recorded;

    tracing::info!(
        output = %args.output.display(),
        keys = %args.keys,
        lead_in,
        ticks = total,
        "rendering"
    );

    let mut scheduler = Scheduler::new(engine.block_period_ms);
    let mut presses = 0u32;
    let mut dropped = 0u32;
    let mut rejected = 0u32;
    let mut skipped = 0u32;
    let mut done = 0;
    let mut now = 0u64;
    while done < total {
        if scheduler.due(now) {
            let report = instrument.tick(now);
            presses += u32::from(report.presses);
            dropped += u32::from(report.dropped_presses);
            rejected += u32::from(report.rejected);
            skipped += u32::from(report.skipped);
            done += 1;
        }
        now += 1;
    }

    let (_, sink, _) = instrument.into_parts();
    let skip = (lead_in * engine.samples_per_block()).min(sink.samples().len());
    let samples = &sink.samples()[skip..];
    WavSink::write_wav(&args.output, samples, engine.sample_rate)?;

    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
    println!("Rendered {}", args.output.display());
    println!(
        "  {} blocks, {:.3}s at {} Hz",
        recorded,
        samples.len() as f64 / f64::from(engine.sample_rate),
        engine.sample_rate
    );
    println!("  {presses} key presses ({dropped} dropped), peak {peak}");
    if rejected > 0 || skipped > 0 {
        println!("  {rejected} rejected encoder transitions, {skipped} skipped ticks");
    }
    Ok(())
}
