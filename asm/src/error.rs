use color_print::cformat;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("missing value")]
    MissingValue,

    #[error("invalid value")]
    InvalidValue,

    #[error("value too large (fits {} to {})", arch::Word::MIN, arch::Word::MAX)]
    ValueTooLarge,

    #[error("missing address")]
    MissingAddress,

    #[error("address out of range (0-99)")]
    AddressOutOfRange,

    #[error("missing instruction")]
    MissingInstruction,

    #[error("unexpected operand: `{0}`")]
    UnexpectedOperand(String),

    #[error("program does not fit in memory ({0} cells)")]
    ProgramTooLarge(usize),
}

/// Where a diagnostic points: source line index (0-based) and a column
/// range counted in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub idx: usize,
    pub raw: String,
    pub col: usize,
    pub width: usize,
}

impl Span {
    pub fn new(idx: usize, raw: &str, col: usize, width: usize) -> Self {
        Span {
            idx,
            raw: raw.to_string(),
            col,
            width: width.max(1),
        }
    }

    pub fn line_no(&self) -> usize {
        self.idx + 1
    }

    /// Source line with tabs as single spaces, so columns line up.
    pub fn source(&self) -> String {
        self.raw.replace('\t', " ")
    }

    /// Spaces up to the token, then one `^` per character.
    pub fn caret(&self) -> String {
        format!("{}{}", " ".repeat(self.col), "^".repeat(self.width))
    }

    /// Locator, source line and caret marker.
    pub fn cformat(&self, file: &str) -> String {
        let line_no = self.line_no();
        [
            cformat!("     <blue>--></> <underline>{}:{}</>", file, line_no),
            cformat!("      <blue>|</>"),
            cformat!(" <blue>{:>4} |</> {}", line_no, self.source()),
            cformat!("      <blue>|</> <red,bold>{}</>", self.caret()),
        ]
        .join("\n")
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {kind}")]
    Syntax { kind: SyntaxError, span: Span },

    #[error("undefined label: {}", names(.0))]
    UndefinedLabels(Vec<(String, Span)>),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

fn names(labels: &[(String, Span)]) -> String {
    labels
        .iter()
        .map(|(label, _)| format!("`{}`", label))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    pub fn syntax(kind: SyntaxError, span: Span) -> Self {
        Error::Syntax { kind, span }
    }

    /// Render with file location and source line.
    pub fn cformat(&self, file: &str) -> String {
        match self {
            Error::Syntax { kind, span } => [
                cformat!("<red,bold>syntax error</>: {}", kind),
                span.cformat(file),
            ]
            .join("\n"),
            Error::UndefinedLabels(labels) => labels
                .iter()
                .map(|(label, span)| {
                    [
                        cformat!("<red,bold>error</>: label `{}` not found", label),
                        span.cformat(file),
                    ]
                    .join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Error::FileOpen(_, err) | Error::FileCreate(_, err) | Error::FileWrite(_, err) => {
                cformat!("<red,bold>error</>: {}: {}", self, err)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A label defined twice. The later address wins; `prev` is the line
    /// index of the earlier definition.
    RedefinedLabel {
        label: String,
        span: Span,
        prev: Span,
    },
}

impl Warning {
    pub fn cformat(&self, file: &str) -> String {
        match self {
            Warning::RedefinedLabel { label, span, prev } => [
                cformat!("<yellow,bold>warn</>: Re-defined label: `{}`", label),
                span.cformat(file),
                cformat!("<green,bold>note</>: Already defined here. The value has been overridden."),
                prev.cformat(file),
            ]
            .join("\n"),
        }
    }
}
