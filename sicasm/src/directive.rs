use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::optab::OpTable;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Directive {
    START,
    END,
    BYTE,
    WORD,
    RESW,
    RESB,
}

/// What the opcode field of a statement names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Instruction(u8),
    Directive(Directive),
    /// The empty opcode field of a synthetic literal pool entry.
    LiteralPool,
    Unknown,
}

impl OpKind {
    /// Operation table mnemonics take precedence over directive names.
    pub fn classify(optab: &OpTable, opcode: &str) -> Self {
        if let Some(code) = optab.lookup(opcode) {
            Self::Instruction(code)
        } else if let Ok(directive) = Directive::from_str(opcode) {
            Self::Directive(directive)
        } else if opcode.is_empty() {
            Self::LiteralPool
        } else {
            Self::Unknown
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Instruction(_) | Self::Directive(_))
    }
}
