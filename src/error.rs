use std::error;
use std::fmt;

/// The error type returned by the public operations of [crate::Cpu] whenever the
/// operation does not complete normally.
///
/// Variants carry just enough context to let a host render a useful message; they
/// deliberately do not embed a full state snapshot (unlike some reference
/// implementations) since callers already hold a `&Cpu` and can inspect state themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip8Error {
    /// A 16-bit word was fetched from memory that does not decode to any of the 35
    /// recognised CHIP-8 instructions (this includes the historical `0NNN` machine-code
    /// call, which this core does not implement).
    InvalidOpcode { opcode: u16 },
    /// `RET` was executed while the call stack was empty.
    StackEmpty,
    /// `CALL` was executed while the call stack already held 16 entries.
    StackOverflow,
    /// An opcode attempted to read or write a memory address outside `[0x000, 0x1000)`.
    MemoryOutOfBounds { address: u32 },
    /// A key index outside `[0, 15]` was passed to `set_key`/`get_key`.
    IndexOutOfRange { index: u8 },
    /// The requested ROM file does not exist.
    RomNotFound { path: String },
    /// The requested ROM file exists but could not be opened.
    RomOpenFailed { path: String },
    /// The requested ROM file was opened but a read from it failed.
    RomReadFailed { path: String },
    /// The ROM is larger than the 3584 bytes addressable from `0x200` to `0xFFF`.
    RomExceedsMaxMemory { len: usize },
}

impl error::Error for Chip8Error {}

impl fmt::Display for Chip8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chip8Error::InvalidOpcode { opcode } => {
                write!(f, "opcode {:#06X} does not decode to a known instruction", opcode)
            }
            Chip8Error::StackEmpty => {
                write!(f, "an attempt was made to pop the call stack while empty")
            }
            Chip8Error::StackOverflow => {
                write!(f, "an attempt was made to push to the call stack while full")
            }
            Chip8Error::MemoryOutOfBounds { address } => {
                write!(f, "memory address {:#06X} is outside the addressable range", address)
            }
            Chip8Error::IndexOutOfRange { index } => {
                write!(f, "key index {} is outside the valid range 0..=15", index)
            }
            Chip8Error::RomNotFound { path } => {
                write!(f, "ROM file not found: {}", path)
            }
            Chip8Error::RomOpenFailed { path } => {
                write!(f, "ROM file could not be opened: {}", path)
            }
            Chip8Error::RomReadFailed { path } => {
                write!(f, "ROM file could not be read: {}", path)
            }
            Chip8Error::RomExceedsMaxMemory { len } => {
                write!(f, "ROM is {} bytes, which exceeds the 3584-byte maximum", len)
            }
        }
    }
}
