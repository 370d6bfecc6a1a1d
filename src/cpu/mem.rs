//! The [Mem] represents the CPU's 4096 bytes of memory
//!
//! The low 0x200 bytes are the interpreter's own area; the font lives at
//! [FONT_ADDR] and program images are loaded at [LOAD_ADDR]. Every access is
//! bounds-checked, and reads past 0xfff are an error, not a wraparound.

use crate::error::{Error, Result};

/// Total size of addressable memory
pub const MEM_SIZE: usize = 4096;
/// Address program images are loaded at
pub const LOAD_ADDR: usize = 0x200;
/// Address of the builtin hex font
pub const FONT_ADDR: u16 = 0x050;
/// Bytes available to a program image
pub const PROGRAM_SIZE: usize = MEM_SIZE - LOAD_ADDR;

/// The builtin font: sprites for hex digits 0-F, 5 bytes each
pub(crate) const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// A flat, owned 4 KiB memory
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    bytes: [u8; MEM_SIZE],
}

impl Mem {
    /// Constructs a zeroed memory with the font in place
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one byte
    /// # Examples
    /// ```rust
    /// # use cheep::cpu::mem::*;
    /// let mem = Mem::new();
    /// assert_eq!(0xf0, mem.read(FONT_ADDR).unwrap());
    /// assert!(mem.read(0x1000).is_err());
    /// ```
    pub fn read(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Error::OutOfBounds { addr: addr as usize })
    }

    /// Writes one byte
    pub fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        match self.bytes.get_mut(addr as usize) {
            Some(byte) => {
                *byte = data;
                Ok(())
            }
            None => Err(Error::OutOfBounds { addr: addr as usize }),
        }
    }

    /// Reads a big-endian instruction word. Both bytes must be in bounds.
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        let hi = self.read(addr)?;
        let lo = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Gets `len` consecutive bytes starting at `addr`
    pub fn slice(&self, addr: u16, len: u16) -> Result<&[u8]> {
        let start = addr as usize;
        let end = start + len as usize;
        self.bytes
            .get(start..end)
            .ok_or(Error::OutOfBounds { addr: end.saturating_sub(1) })
    }

    /// Gets `len` consecutive bytes starting at `addr`, mutably
    pub fn slice_mut(&mut self, addr: u16, len: u16) -> Result<&mut [u8]> {
        let start = addr as usize;
        let end = start + len as usize;
        self.bytes
            .get_mut(start..end)
            .ok_or(Error::OutOfBounds { addr: end.saturating_sub(1) })
    }

    /// Loads a program image at [LOAD_ADDR], clearing the program area first.
    ///
    /// Images larger than [PROGRAM_SIZE] are rejected whole.
    /// # Examples
    /// ```rust
    /// # use cheep::cpu::mem::*;
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0xa2, 0x00]).unwrap();
    /// assert_eq!(0xa200, mem.read_word(0x200).unwrap());
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        if rom.len() > PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge { len: rom.len() });
        }
        self.bytes[LOAD_ADDR..].fill(0);
        self.bytes[LOAD_ADDR..LOAD_ADDR + rom.len()].copy_from_slice(rom);
        Ok(self)
    }
}

impl Default for Mem {
    fn default() -> Self {
        let mut bytes = [0; MEM_SIZE];
        let font = FONT_ADDR as usize;
        bytes[font..font + FONT.len()].copy_from_slice(&FONT);
        Mem { bytes }
    }
}

impl std::fmt::Debug for Mem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}
