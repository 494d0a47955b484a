use std::{fmt::Display, io, path::PathBuf};

use log::warn;
use thiserror::Error;

/// Errors that stop an assembly run before any object program is produced.
#[derive(Error, Debug)]
pub enum AsmError {
    #[error("couldn't read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't read operation table")]
    OpTableRead(#[source] io::Error),
    #[error("mnemonic {0} has no opcode")]
    MalformedOpTable(String),
    #[error("invalid opcode {opcode} for mnemonic {mnemonic}")]
    InvalidOpcode { mnemonic: String, opcode: String },
    #[error("malformed intermediate line {line}: {text}")]
    MalformedIntermediate { line: usize, text: String },
}

pub type Result<T> = std::result::Result<T, AsmError>;

/// Problems that are reported but don't stop either pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("symbol {label} already defined at {kept:04X}")]
    DuplicateSymbol { label: String, kept: usize },
    #[error("unknown opcode {0}, sized as one word")]
    UnknownOpcode(String),
    #[error("malformed operand '{operand}' for {opcode}")]
    MalformedOperand { opcode: String, operand: String },
    #[error("START must be the first statement")]
    MisplacedStart,
    #[error("invalid start address '{0}'")]
    InvalidStartAddress(String),
    #[error("constant {0} doesn't fit in one byte, keeping its last byte")]
    ByteOverflow(String),
    #[error("literal {0} has no address")]
    UnresolvedLiteral(String),
    #[error("undefined symbol {0}")]
    UndefinedSymbol(String),
    #[error("mnemonic {0} defined more than once, keeping the first opcode")]
    DuplicateMnemonic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Collects diagnostics in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: Option<usize>, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { line, kind };
        warn!("{}", diagnostic);
        self.reported.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.reported
    }
}
