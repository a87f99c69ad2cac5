//! Two-pass assembler for LMC assembly.
//!
//! [`parse`] reads the source line by line, emitting values and pending
//! label references while it fills the label table. [`Assembly::resolve`]
//! then replaces every reference with `base + address`.

pub mod error;
pub mod label;
pub mod parser;
pub mod util;

use arch::{Word, MEM_SIZE};
use indexmap::IndexMap;

use error::{Error, Span, SyntaxError, Warning};
use label::Labels;
use parser::{MachineWord, Operand, Stmt};

#[derive(Debug, Clone)]
pub struct Line {
    pub idx: usize,
    pub raw: String,
    /// Statement and the address it was emitted at.
    pub stmt: Option<(usize, Stmt)>,
}

#[derive(Debug, Default)]
pub struct Assembly {
    pub lines: Vec<Line>,
    pub labels: Labels,
    pub warnings: Vec<Warning>,
}

/// Phase one. Stops at the first syntax error.
pub fn parse<'a>(src: impl IntoIterator<Item = &'a str>) -> Result<Assembly, Error> {
    let mut asm = Assembly::default();
    let mut pc: usize = 0;

    for (idx, raw) in src.into_iter().enumerate() {
        let stmt = Stmt::parse(idx, raw)?;
        let stmt = match stmt {
            Some(stmt) => {
                if pc >= MEM_SIZE {
                    return Err(Error::syntax(
                        SyntaxError::ProgramTooLarge(MEM_SIZE),
                        Span::new(idx, raw, 0, raw.chars().count()),
                    ));
                }
                asm.collect_labels(idx, raw, &stmt, pc);
                pc += 1;
                Some((pc - 1, stmt))
            }
            None => None,
        };
        asm.lines.push(Line {
            idx,
            raw: raw.to_string(),
            stmt,
        });
    }
    Ok(asm)
}

/// Parse and resolve in one go.
pub fn assemble(src: &str) -> Result<Vec<Word>, Error> {
    parse(src.lines())?.resolve()
}

impl Assembly {
    fn collect_labels(&mut self, idx: usize, raw: &str, stmt: &Stmt, pc: usize) {
        for label in &stmt.labels {
            if let Some(prev) = self.labels.define(label, pc, idx) {
                let (col, width) = parser::tokenize(raw)
                    .into_iter()
                    .find(|tok| tok.text == label.as_str())
                    .map_or((0, 1), |tok| (tok.col, tok.width()));
                let prev_raw = self
                    .lines
                    .get(prev.line)
                    .map(|line| line.raw.as_str())
                    .unwrap_or("");
                self.warnings.push(Warning::RedefinedLabel {
                    label: label.clone(),
                    span: Span::new(idx, raw, col, width),
                    prev: Span::new(prev.line, prev_raw, 0, prev_raw.chars().count()),
                });
            }
        }
        if let Some(Operand::Label { name, .. }) = &stmt.operand {
            self.labels.reference(name, idx);
        }
    }

    pub fn stmts(&self) -> impl Iterator<Item = (&Line, usize, &Stmt)> {
        self.lines
            .iter()
            .filter_map(|line| line.stmt.as_ref().map(|(addr, stmt)| (line, *addr, stmt)))
    }

    /// Phase-one output, in emission order.
    pub fn words(&self) -> Vec<MachineWord> {
        self.stmts().map(|(_, _, stmt)| stmt.emit()).collect()
    }

    /// Replace every reference whose label has an address. The rest become
    /// [`MachineWord::Invalid`].
    pub fn link(&self) -> Vec<MachineWord> {
        self.words()
            .into_iter()
            .map(|word| match word {
                MachineWord::Ref { base, label } => match self.labels.get_val(&label) {
                    Some(addr) => MachineWord::Value(base + addr as Word),
                    None => MachineWord::Invalid(label),
                },
                word => word,
            })
            .collect()
    }

    /// Phase two. Fails listing every undefined label, each with the first
    /// line that references it.
    pub fn resolve(&self) -> Result<Vec<Word>, Error> {
        let mut undefined: IndexMap<String, Span> = IndexMap::new();
        let mut out = vec![];

        for ((line, _, stmt), word) in self.stmts().zip(self.link()) {
            match word {
                MachineWord::Value(v) => out.push(v),
                MachineWord::Invalid(label) | MachineWord::Ref { label, .. } => {
                    if !undefined.contains_key(&label) {
                        let (col, width) = match &stmt.operand {
                            Some(Operand::Label { col, width, .. }) => (*col, *width),
                            _ => (0, line.raw.chars().count()),
                        };
                        let span = Span::new(line.idx, &line.raw, col, width);
                        undefined.insert(label, span);
                    }
                }
            }
        }

        if undefined.is_empty() {
            Ok(out)
        } else {
            Err(Error::UndefinedLabels(undefined.into_iter().collect()))
        }
    }
}
