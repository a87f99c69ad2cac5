use strum::{Display, EnumIter, EnumString};

use crate::Word;

/// Assembly mnemonics, including the `DAT` pseudo-instruction.
///
/// Parsing is case-sensitive: `add` is not a mnemonic and reads as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
pub enum OpKind {
    ADD,
    SUB,
    STA,
    LDA,
    BRA,
    BRZ,
    BRP,
    INP,
    OUT,
    HLT,
    DAT,
}

impl OpKind {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// No operand.
    None,
    /// Memory address `0..=99` or a label.
    Addr,
    /// Literal stored verbatim.
    Value,
}

impl OpKind {
    /// Opcode base. `DAT` has none: it stores its operand as-is.
    pub fn base(&self) -> Option<Word> {
        use OpKind::*;
        match self {
            ADD => Some(100),
            SUB => Some(200),
            STA => Some(300),
            LDA => Some(500),
            BRA => Some(600),
            BRZ => Some(700),
            BRP => Some(800),
            INP => Some(901),
            OUT => Some(902),
            HLT => Some(0),
            DAT => None,
        }
    }

    pub fn arg(&self) -> Arg {
        use OpKind::*;
        match self {
            ADD | SUB | STA | LDA | BRA | BRZ | BRP => Arg::Addr,
            INP | OUT | HLT => Arg::None,
            DAT => Arg::Value,
        }
    }
}
