use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// A fault raised while executing a single cycle.
///
/// Faults are local to one `step` call and are never retried; side effects
/// performed before the fault point are left in place.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The fetched opcode doesn't map to any instruction.
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    /// A subroutine call would exceed the 16-slot call stack.
    #[error("call stack overflow")]
    StackOverflow,

    /// A return was executed with nothing on the call stack.
    #[error("return with an empty call stack")]
    StackUnderflow,

    /// A fetch, sprite read, or memory write would cross the 4K boundary.
    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: u16 },
}

/// Errors raised while loading a ROM, before any cycle has run.
#[derive(Debug, Error)]
pub enum RomError {
    /// The ROM doesn't fit between the program start offset and the end of
    /// memory. Nothing is written to memory when this is raised.
    #[error("ROM is {size} bytes but at most {} fit in memory", MAX_ROM_SIZE)]
    TooLarge { size: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
