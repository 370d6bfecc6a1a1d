//! The random-byte source behind the `Cxbb` instruction
//!
//! The source is injectable so `rand` is genuinely random in production and
//! fully deterministic under test.

use rand::RngCore;

/// Yields one pseudo-random byte per call
pub trait RandomByte {
    /// Produces the next byte from the source
    fn next_byte(&mut self) -> u8;
}

/// Any [rand] generator is a [RandomByte] source
impl<R: RngCore> RandomByte for R {
    fn next_byte(&mut self) -> u8 {
        (self.next_u32() & 0xff) as u8
    }
}
