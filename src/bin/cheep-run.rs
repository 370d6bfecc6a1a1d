//! Headless driver for the interpreter core: loads a ROM, runs a number of
//! logical frames, then prints the screen and a register dump.
//!
//! Time here is purely logical: each frame is `ipf` instructions followed by
//! one timer tick, with no wall-clock pacing at all.

use cheep::{error::Result, CPU};
use gumdrop::Options;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Options)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "ROM image to load at 0x200", free, required)]
    file: PathBuf,
    #[options(help = "Instructions per 60Hz timer tick", default = "8")]
    ipf: usize,
    #[options(help = "Number of logical frames to run", default = "600")]
    frames: usize,
    #[options(help = "Print live disassembly while running")]
    trace: bool,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let mut cpu = CPU::new(&options.file)?;
    cpu.debug = options.trace;
    'frames: for _ in 0..options.frames {
        for _ in 0..options.ipf {
            if let Err(error) = cpu.tick() {
                eprintln!("halted: {error}");
                break 'frames;
            }
        }
        cpu.tick_timers();
    }
    println!("{}", cpu.screen());
    cpu.dump();
    Ok(())
}
