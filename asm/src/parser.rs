use std::num::IntErrorKind;

use arch::{
    op::{Arg, OpKind},
    Word, ADDR_MAX,
};
use color_print::cformat;

use crate::error::{Error, Span, SyntaxError};

// ----------------------------------------------------------------------------
// Token

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Column in characters.
    pub col: usize,
}

impl Token<'_> {
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn tokenize(raw: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut start = None;
    for (col, (idx, c)) in raw.char_indices().chain([(raw.len(), ' ')]).enumerate() {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some((col, idx)),
            (Some((col0, idx0)), true) => {
                tokens.push(Token {
                    text: &raw[idx0..idx],
                    col: col0,
                });
                start = None;
            }
            _ => {}
        }
    }
    tokens
}

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(Word),
    Label { name: String, col: usize, width: usize },
}

/// One non-blank source line: the labels it defines and the instruction
/// that follows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub labels: Vec<String>,
    pub kind: OpKind,
    pub operand: Option<Operand>,
}

impl Stmt {
    /// Parse line `idx`. Blank lines give `Ok(None)`.
    ///
    /// Any token that is not a mnemonic defines a label at this line's
    /// address, and the rest of the line is read again as an instruction.
    pub fn parse(idx: usize, raw: &str) -> Result<Option<Stmt>, Error> {
        let tokens = tokenize(raw);
        let err = |kind, col, width| Error::syntax(kind, Span::new(idx, raw, col, width));

        let mut labels = vec![];
        let mut rest = &tokens[..];
        let mut prev: Option<&Token> = None;
        loop {
            let Some((head, tail)) = rest.split_first() else {
                return match prev {
                    None => Ok(None),
                    Some(prev) => Err(err(
                        SyntaxError::MissingInstruction,
                        prev.col + prev.width() + 1,
                        1,
                    )),
                };
            };
            match OpKind::parse(head.text) {
                Some(kind) => {
                    let operand = Operand::parse(kind, head, tail, &err)?;
                    return Ok(Some(Stmt {
                        labels,
                        kind,
                        operand,
                    }));
                }
                None => {
                    labels.push(head.text.to_string());
                    prev = Some(head);
                    rest = tail;
                }
            }
        }
    }

    /// Phase-one machine word: a value, or a reference still waiting for
    /// its label.
    pub fn emit(&self) -> MachineWord {
        // DAT has no base, so its literal is stored as-is.
        let base = self.kind.base().unwrap_or_default();
        match &self.operand {
            Some(Operand::Literal(value)) => MachineWord::Value(base + value),
            Some(Operand::Label { name, .. }) => MachineWord::Ref {
                base,
                label: name.clone(),
            },
            None => MachineWord::Value(base),
        }
    }

    pub fn cformat(&self) -> String {
        let labels = self
            .labels
            .iter()
            .map(|label| cformat!("<g>{}</> ", label))
            .collect::<String>();
        let operand = match &self.operand {
            Some(Operand::Literal(v)) => cformat!("<y>{}</>", v),
            Some(Operand::Label { name, .. }) => cformat!("<c>{}</>", name),
            None => String::new(),
        };
        cformat!("{}<red>{:<4}</>{}", labels, self.kind, operand)
    }
}

impl Operand {
    fn parse(
        kind: OpKind,
        head: &Token,
        tail: &[Token],
        err: &dyn Fn(SyntaxError, usize, usize) -> Error,
    ) -> Result<Option<Operand>, Error> {
        let after_head = head.col + head.width() + 1;
        match kind.arg() {
            Arg::None => Ok(None),
            Arg::Value => {
                let tok = tail
                    .first()
                    .ok_or_else(|| err(SyntaxError::MissingValue, after_head, 1))?;
                let value = tok.text.parse::<Word>().map_err(|e| {
                    let kind = match e.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            SyntaxError::ValueTooLarge
                        }
                        _ => SyntaxError::InvalidValue,
                    };
                    err(kind, tok.col, tok.width())
                })?;
                Ok(Some(Operand::Literal(value)))
            }
            Arg::Addr => {
                let tok = match tail {
                    [] => return Err(err(SyntaxError::MissingAddress, after_head, 1)),
                    [tok] => tok,
                    [_, extra, ..] => {
                        return Err(err(
                            SyntaxError::UnexpectedOperand(extra.text.to_string()),
                            extra.col,
                            extra.width(),
                        ))
                    }
                };
                if !is_numeric(tok.text) {
                    return Ok(Some(Operand::Label {
                        name: tok.text.to_string(),
                        col: tok.col,
                        width: tok.width(),
                    }));
                }
                match tok.text.parse::<Word>() {
                    Ok(addr) if (0..=ADDR_MAX).contains(&addr) => Ok(Some(Operand::Literal(addr))),
                    _ => Err(err(SyntaxError::AddressOutOfRange, tok.col, tok.width())),
                }
            }
        }
    }
}

/// Optional sign followed by decimal digits.
fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// ----------------------------------------------------------------------------
// Machine word

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineWord {
    /// Fully known.
    Value(Word),
    /// `base + address of label`, known once the label table is complete.
    Ref { base: Word, label: String },
    /// A reference whose label never got an address.
    Invalid(String),
}
