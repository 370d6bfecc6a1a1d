//! Walks a ROM image two bytes at a time, printing styled disassembly.

use cheep::{error::Result, prelude::*};
use gumdrop::Options;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Options)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "ROM image to disassemble", free, required)]
    file: PathBuf,
    #[options(help = "Start disassembling at offset...")]
    offset: usize,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let disassembler = Dis::default();
    let tail = contents.get(options.offset..).unwrap_or_default();
    for (index, word) in tail.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([word[0], word[1]]);
        println!(
            "{:03x}: {} {:04x}",
            2 * index + 0x200 + options.offset,
            disassembler.once(word),
            word.bright_black(),
        );
    }
    Ok(())
}
