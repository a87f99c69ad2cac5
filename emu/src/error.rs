use arch::Word;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid instruction `{word}` at address {addr}")]
    InvalidInstruction { addr: usize, word: Word },

    #[error("accumulator overflow at address {addr}")]
    Overflow { addr: usize },

    #[error("cannot read input in non-interactive mode")]
    InputStarved,

    #[error("input closed")]
    InputClosed,

    #[error("line {line}: cannot parse `{raw}` as a machine word")]
    ParseWord { line: usize, raw: String },

    #[error("line {line}: `{raw}` does not fit in a memory cell")]
    WordTooLarge { line: usize, raw: String },

    #[error("program has {0} words but memory holds 100")]
    ProgramTooLarge(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Console I/O failed")]
    Io(#[source] std::io::Error),

    #[error("Failed to parse dump config: {0}")]
    DumpConfig(String, #[source] serde_yaml::Error),
}
