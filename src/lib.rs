//! This crate implements the interpreter core of a Chip-8 virtual machine:
//! the complete architectural state, and a fetch/decode/execute step that
//! advances it one instruction at a time.
//!
//! Everything around the core is a collaborator the caller brings along:
//! something loads ROM bytes into memory, something reads the screen,
//! something feeds the keypad, and something calls [CPU::tick] and
//! [CPU::tick_timers] at whatever cadence it likes. The core itself never
//! touches a wall clock.

pub mod cpu;
pub mod error;

pub use cpu::{screen::Screen, CPU};
pub use error::{Error, Result};

/// Common imports for cheep
pub mod prelude {
    pub use crate::cpu::{
        instruction::disassembler::{Dis, Disassembler},
        rand::RandomByte,
        screen::Screen,
        CPU,
    };
    pub use crate::error::{Error, Result};
}
