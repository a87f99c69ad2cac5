//! Shared encoding of the LMC ("Little Man Computer") architecture.
//!
//! Every machine word is `instruction * 100 + operand`; the assembler and
//! the emulator agree on nothing else.

pub mod inst;
pub mod op;

/// A memory cell. Real opcodes are `0..=999` but `DAT` and `STA` may store
/// any value that fits; arithmetic past this range is an error, never a wrap.
pub type Word = i128;

/// Number of memory cells.
pub const MEM_SIZE: usize = 100;

/// Highest address an instruction operand can name.
pub const ADDR_MAX: Word = MEM_SIZE as Word - 1;
