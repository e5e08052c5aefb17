//! Print the keyboard-to-pitch table.

use clap::Args;
use knobsynth_core::{KEYMAP, Pitch};

/// Print the character to pitch table.
#[derive(Args)]
pub struct KeymapArgs {}

/// Run the keymap command.
pub fn run(_args: KeymapArgs) -> anyhow::Result<()> {
    println!("Keymap\n");
    println!("{:<6} {:<6} {:>10}", "Key", "Pitch", "Hz");
    for (key, pitch) in KEYMAP {
        println!(
            "{:<6} {:<6} {:>10.3}",
            char::from(key),
            pitch.name(),
            pitch.frequency()
        );
    }
    let fallback = Pitch::default();
    println!(
        "{:<6} {:<6} {:>10.3}",
        "other",
        fallback.name(),
        fallback.frequency()
    );
    Ok(())
}
