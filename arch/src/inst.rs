use crate::{op::OpKind, Word};

use color_print::cformat;
use num_enum::TryFromPrimitive;
use thiserror::Error;

/// Leading digit of a machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
enum Digit {
    HLT = 0,
    ADD = 1,
    SUB = 2,
    STA = 3,
    LDA = 5,
    BRA = 6,
    BRZ = 7,
    BRP = 8,
    IO = 9,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid instruction: `{0}`")]
    InvalidInstruction(Word),
}

/// A decoded instruction. Address operands are always `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    HLT,
    ADD(u8),
    SUB(u8),
    STA(u8),
    LDA(u8),
    BRA(u8),
    BRZ(u8),
    BRP(u8),
    INP,
    OUT,
    /// `9xx` other than `901`/`902`: does nothing and moves on.
    NOP(u8),
}

impl Inst {
    /// Splits `word` into `word / 100` and `word % 100` (floored, so
    /// negative words never alias a real opcode) and decodes the pair.
    pub fn decode(word: Word) -> Result<Inst, DecodeError> {
        let invalid = DecodeError::InvalidInstruction(word);
        let digit = u8::try_from(word.div_euclid(100)).map_err(|_| invalid)?;
        let digit = Digit::try_from(digit).map_err(|_| invalid)?;
        let operand = word.rem_euclid(100) as u8;

        let inst = match digit {
            Digit::HLT => Inst::HLT,
            Digit::ADD => Inst::ADD(operand),
            Digit::SUB => Inst::SUB(operand),
            Digit::STA => Inst::STA(operand),
            Digit::LDA => Inst::LDA(operand),
            Digit::BRA => Inst::BRA(operand),
            Digit::BRZ => Inst::BRZ(operand),
            Digit::BRP => Inst::BRP(operand),
            Digit::IO => match operand {
                1 => Inst::INP,
                2 => Inst::OUT,
                port => Inst::NOP(port),
            },
        };
        Ok(inst)
    }

    /// Mnemonic, if the instruction has one. `NOP` cannot be written in
    /// assembly.
    pub fn kind(&self) -> Option<OpKind> {
        let kind = match self {
            Inst::HLT => OpKind::HLT,
            Inst::ADD(_) => OpKind::ADD,
            Inst::SUB(_) => OpKind::SUB,
            Inst::STA(_) => OpKind::STA,
            Inst::LDA(_) => OpKind::LDA,
            Inst::BRA(_) => OpKind::BRA,
            Inst::BRZ(_) => OpKind::BRZ,
            Inst::BRP(_) => OpKind::BRP,
            Inst::INP => OpKind::INP,
            Inst::OUT => OpKind::OUT,
            Inst::NOP(_) => return None,
        };
        Some(kind)
    }

    pub fn addr(&self) -> Option<u8> {
        match self {
            Inst::ADD(a)
            | Inst::SUB(a)
            | Inst::STA(a)
            | Inst::LDA(a)
            | Inst::BRA(a)
            | Inst::BRZ(a)
            | Inst::BRP(a) => Some(*a),
            Inst::HLT | Inst::INP | Inst::OUT | Inst::NOP(_) => None,
        }
    }

    pub fn cformat(&self) -> String {
        match (self.kind(), self.addr()) {
            (Some(kind), Some(addr)) => cformat!("<red>{:<4}</><blue>{:0>2}</>", kind, addr),
            (Some(kind), None) => cformat!("<red>{:<4}</>  ", kind),
            (None, _) => cformat!("<dim>{:<6}</>", self.to_string()),
        }
    }
}

impl std::fmt::Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind(), self.addr()) {
            (Some(kind), Some(addr)) => write!(f, "{} {}", kind, addr),
            (Some(kind), None) => write!(f, "{}", kind),
            (None, _) => write!(f, "nop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(Inst::decode(0), Ok(Inst::HLT));
        assert_eq!(Inst::decode(42), Ok(Inst::HLT));
        assert_eq!(Inst::decode(199), Ok(Inst::ADD(99)));
        assert_eq!(Inst::decode(500), Ok(Inst::LDA(0)));
        assert_eq!(Inst::decode(712), Ok(Inst::BRZ(12)));
        assert_eq!(Inst::decode(901), Ok(Inst::INP));
        assert_eq!(Inst::decode(902), Ok(Inst::OUT));
    }

    #[test]
    fn decode_other_io_is_nop() {
        assert_eq!(Inst::decode(900), Ok(Inst::NOP(0)));
        assert_eq!(Inst::decode(903), Ok(Inst::NOP(3)));
        assert_eq!(Inst::decode(999), Ok(Inst::NOP(99)));
        assert_eq!(Inst::NOP(3).kind(), None);
        assert_eq!(Inst::NOP(3).addr(), None);
    }

    #[test]
    fn decode_invalid() {
        for word in [400, 450, 499, 1000, 12345, -1, -100] {
            assert_eq!(
                Inst::decode(word),
                Err(DecodeError::InvalidInstruction(word)),
                "{word}"
            );
        }
    }

    #[test]
    fn mnemonic_roundtrip() {
        let cases = [
            (OpKind::ADD, Some(7)),
            (OpKind::SUB, Some(0)),
            (OpKind::STA, Some(99)),
            (OpKind::BRP, Some(42)),
            (OpKind::INP, None),
            (OpKind::OUT, None),
            (OpKind::HLT, None),
        ];
        for (kind, addr) in cases {
            let word = kind.base().unwrap() + addr.map_or(0, Word::from);
            let inst = Inst::decode(word).unwrap();
            assert_eq!(inst.kind(), Some(kind));
            assert_eq!(inst.addr(), addr);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Inst::BRA(3).to_string(), "BRA 3");
        assert_eq!(Inst::OUT.to_string(), "OUT");
        assert_eq!(Inst::NOP(0).to_string(), "nop");
    }
}
