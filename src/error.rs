/*!
error.rs - The single failure kind the core can raise.

Every other core operation is total: memory access never fails, register
and stack arithmetic wrap instead of panicking. The one exception is
fetching a byte that isn't one of the 151 documented opcodes.
*/

use std::fmt;

/// Raised by `step`/`run_for` when the fetched opcode is not one of the 151
/// documented values. `pc` is the address the opcode byte was fetched from
/// (PC *before* the fetch advanced it); `byte` is the offending opcode.
///
/// No state beyond the opcode fetch itself is mutated when this is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalOpcode {
    pub pc: u16,
    pub byte: u8,
}

impl fmt::Display for IllegalOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal opcode ${:02X} at ${:04X}",
            self.byte, self.pc
        )
    }
}

impl std::error::Error for IllegalOpcode {}
