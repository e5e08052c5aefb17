//! Print the LFO routing table.

use clap::Args;
use knobsynth_core::{LfoTarget, TriState};

/// Print which LFO each switch combination selects.
#[derive(Args)]
pub struct RoutesArgs {}

/// Run the routes command.
pub fn run(_args: RoutesArgs) -> anyhow::Result<()> {
    println!("LFO Routes\n");
    println!("{:<10} {:<10} {}", "osc", "target", "lfo");
    for osc in TriState::ALL {
        for target in TriState::ALL {
            let lfo = LfoTarget::resolve(osc, target).map_or("-", LfoTarget::name);
            println!("{:<10} {:<10} {}", osc.name(), target.name(), lfo);
        }
    }
    Ok(())
}
