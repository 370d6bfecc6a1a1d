//! Error type for cheep
//!
//! Every kind here is fatal to the running instruction stream. The core never
//! recovers on its own; the driver decides whether to halt, log, or step past.

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cheep.
#[derive(Debug, Error)]
pub enum Error {
    /// The fetched word matches no entry in the dispatch table
    #[error("opcode {word:04x} not recognized")]
    UnknownOpcode {
        /// The offending word
        word: u16,
    },
    /// A call executed with all 16 stack slots already in use
    #[error("call to {addr:03x} would overflow the 16-slot stack")]
    StackOverflow {
        /// The call target that was never reached
        addr: u16,
    },
    /// A return executed with an empty stack
    #[error("return executed with an empty stack")]
    StackUnderflow,
    /// A fetch, load, or store reached outside the 4096-byte address space
    #[error("address {addr:04x} is outside addressable memory")]
    OutOfBounds {
        /// The first address past the end of memory that was touched
        addr: usize,
    },
    /// A program image would extend past the end of memory
    #[error("program image of {len} bytes does not fit in the 3584 bytes above 0x200")]
    ProgramTooLarge {
        /// Size of the rejected image
        len: usize,
    },
    /// Tried to press or release a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
