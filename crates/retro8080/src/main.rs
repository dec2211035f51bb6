use std::sync::atomic::AtomicBool;

use anyhow::Context;
use retro8080::{Machine, MachineConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!(
            "No ROM path provided.\n\
             Usage: retro8080 <rom-path> [max-cycles]\n\
             For example: retro8080 roms/invaders.rom 2000000"
        );
        std::process::exit(1);
    };
    let max_cycles = args
        .next()
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("max-cycles must be a non-negative integer")?;

    log::info!("Playing ROM path: '{}'", rom_path);
    let config = MachineConfig::builder()
        .rom_path(rom_path)
        .max_cycles(max_cycles)
        .build();
    let mut machine = Machine::new(config)?;

    let stop = AtomicBool::new(false);
    let summary = machine.run(&stop)?;
    println!(
        "{:?} after {} instructions ({} cycles)",
        summary.state, summary.instructions, summary.cycles
    );
    Ok(())
}
