//! Knobsynth CLI - run the knob-panel synthesizer on a desktop.

mod commands;
mod config;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knobsynth")]
#[command(author, version, about = "Knob-panel synthesizer host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scripted session to a WAV file
    Render(commands::render::RenderArgs),

    /// Show which key plays which pitch
    Keymap(commands::keymap::KeymapArgs),

    /// Show which switch positions route the LFO where
    Routes(commands::routes::RoutesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Keymap(args) => commands::keymap::run(args),
        Commands::Routes(args) => commands::routes::run(args),
    }
}
