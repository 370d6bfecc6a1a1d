//! Holds the machine state and runs the fetch/decode/execute step
//!
//! The [CPU] owns every piece of architectural state the interpreter has:
//! memory, registers, stack, timers, keypad and screen. An external driver
//! advances it by calling [CPU::tick] per instruction and [CPU::tick_timers]
//! at 60 Hz of logical time; the two rates are independent.


mod behavior;
pub mod instruction;
pub mod mem;
pub mod rand;
pub mod screen;

use self::{
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, FONT_ADDR},
    rand::RandomByte,
    screen::Screen,
};
use crate::error::{Error, Result};
use ::rand::{rngs::StdRng, SeedableRng};
use imperative_rs::InstructionSet;
use owo_colors::OwoColorize;
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum call depth; a 17th nested call is a [Error::StackOverflow]
pub const STACK_DEPTH: usize = 16;

/// The complete state of a Chip-8 machine
pub struct CPU {
    /// Set to print live disassembly of every executed instruction
    pub debug: bool,
    // memory
    mem: Mem,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    screen: Screen,
    keys: [bool; 16],
    /// `Some(x)` while suspended in `fx0a`, waiting to store a key in vX
    waiting: Option<Reg>,
    // Execution data
    cycle: usize,
    rng: Box<dyn RandomByte>,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a CPU with the ROM image at `rom` loaded at 0x200.
    ///
    /// An unreadable file surfaces as [Error::IoError], an image that would
    /// extend past 0xfff as [Error::ProgramTooLarge].
    pub fn new(rom: impl AsRef<std::path::Path>) -> Result<Self> {
        let mut cpu = CPU::default();
        cpu.load_program(rom)?;
        Ok(cpu)
    }

    /// Loads a program image from a file into memory at 0x200
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads a program image into memory at 0x200
    /// # Examples
    /// ```rust
    /// # use cheep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0xa2, 0x00, 0x60, 0x05]).unwrap();
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        Ok(self)
    }

    /// Executes a single fetch/decode/execute step.
    ///
    /// While the CPU is [waiting for a key](CPU::is_waiting) this is a no-op,
    /// so a cooperative driver can keep calling it at its usual rate.
    ///
    /// Every error is fatal to the instruction stream; the driver decides
    /// whether to halt. See [enum@Error] for the kinds.
    /// # Examples
    /// ```rust
    /// # use cheep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0xa2, 0x00, 0x60, 0x05]).unwrap();
    /// cpu.tick().unwrap();
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// A word that matches no dispatch-table entry is reported, not skipped:
    /// ```rust
    /// # use cheep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0xff, 0xff]).unwrap();
    /// cpu.tick().expect_err("0xffff is not an instruction");
    /// ```
    pub fn tick(&mut self) -> Result<&mut Self> {
        if self.waiting.is_some() {
            return Ok(self);
        }
        // fetch advances pc past the word before execute runs, so `call`
        // pushes the return address, not its own address
        let pc = self.pc;
        let word = self.mem.read_word(pc)?;
        self.pc = pc.wrapping_add(2);
        if self.debug {
            println!(
                "{:4} {:03x}: {}",
                self.cycle.bright_black(),
                pc,
                self.disassembler.once(word)
            );
        }
        self.cycle += 1;
        match Insn::decode(&word.to_be_bytes()) {
            Ok((_, insn)) => self.execute(insn)?,
            Err(_) => return Err(Error::UnknownOpcode { word }),
        }
        Ok(self)
    }

    /// Decrements both timers by 1, saturating at 0.
    ///
    /// The driver calls this at 60 ticks per logical second, independent of
    /// how often it calls [CPU::tick].
    /// # Examples
    /// ```rust
    /// # use cheep::*;
    /// let mut cpu = CPU::default();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    ///
    /// A press edge is what resumes a CPU suspended in `fx0a`: the key code
    /// is stored in the waiting register exactly once.
    /// # Examples
    /// ```rust
    /// # use cheep::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// assert!(cpu.press(0x7).unwrap());
    /// // key `7` is already down, so nothing changes
    /// assert!(!cpu.press(0x7).unwrap());
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let Some(keyref) = self.keys.get_mut(key) else {
            return Err(Error::InvalidKey { key });
        };
        if *keyref {
            return Ok(false);
        }
        *keyref = true;
        if let Some(x) = self.waiting.take() {
            self.v[x] = key as u8;
        }
        Ok(true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let Some(keyref) = self.keys.get_mut(key) else {
            return Err(Error::InvalidKey { key });
        };
        let was_pressed = *keyref;
        *keyref = false;
        Ok(was_pressed)
    }

    /// True while the CPU is suspended in `fx0a`, waiting for a key press
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    /// Replaces the random-byte source used by the `cxbb` instruction
    pub fn set_rng(&mut self, rng: Box<dyn RandomByte>) -> &mut Self {
        self.rng = rng;
        self
    }

    /// Sets a general purpose register.
    /// If the register doesn't exist, returns [Error::InvalidRegister].
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        match self.v.get_mut(reg) {
            Some(gpr) => {
                *gpr = value;
                Ok(())
            }
            None => Err(Error::InvalidRegister { reg }),
        }
    }

    /// Gets a slice of all 16 general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use cheep::*;
    /// assert_eq!(0x200, CPU::default().pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the delay timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value in the sound timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the number of instructions executed so far
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Read-only view of the screen, for the renderer to poll
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Resets the machine: registers, stack, timers, keypad, screen and
    /// cycle count are cleared and pc returns to 0x200. Memory (and the
    /// loaded program) is left alone.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.pc = 0x200;
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        self.keys = [false; 16];
        self.waiting = None;
        self.screen.clear();
        self.cycle = 0;
    }

    /// Dumps the current state of all registers and the cycle count
    pub fn dump(&self) {
        println!(
            "PC: {:04x}, SP: {:4}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("keys", &self.keys)
            .field("waiting", &self.waiting)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a CPU with zeroed state, the font in memory, and
    /// `pc = 0x200`
    fn default() -> Self {
        CPU {
            debug: false,
            mem: Mem::default(),
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: 0x200,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            screen: Screen::default(),
            keys: [false; 16],
            waiting: None,
            cycle: 0,
            rng: Box::new(StdRng::from_entropy()),
            disassembler: Dis::default(),
        }
    }
}
