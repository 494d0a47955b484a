use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use indexmap::{map::Entry, IndexMap};
use log::debug;

use crate::error::{AsmError, Result};

const SIC_OPCODES: [(&str, u8); 26] = [
    ("ADD", 0x18),
    ("AND", 0x40),
    ("COMP", 0x28),
    ("DIV", 0x24),
    ("J", 0x3C),
    ("JEQ", 0x30),
    ("JGT", 0x34),
    ("JLT", 0x38),
    ("JSUB", 0x48),
    ("LDA", 0x00),
    ("LDCH", 0x50),
    ("LDL", 0x08),
    ("LDX", 0x04),
    ("MUL", 0x20),
    ("OR", 0x44),
    ("RD", 0xD8),
    ("RSUB", 0x4C),
    ("STA", 0x0C),
    ("STCH", 0x54),
    ("STL", 0x14),
    ("STSW", 0xE8),
    ("STX", 0x10),
    ("SUB", 0x1C),
    ("TD", 0xE0),
    ("TIX", 0x2C),
    ("WD", 0xDC),
];

/// Mnemonic to opcode mapping. Lookups are exact: no aliasing, no case folding.
#[derive(Debug, Clone, Default)]
pub struct OpTable {
    opcodes: IndexMap<String, u8>,
    duplicates: Vec<String>,
}

impl OpTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard SIC instruction set.
    pub fn sic() -> Self {
        let mut table = Self::new();
        for (mnemonic, opcode) in SIC_OPCODES {
            table.insert(mnemonic.to_owned(), opcode);
        }
        table
    }

    /// Reads whitespace separated `mnemonic opcode` pairs until the input is
    /// exhausted. Opcodes are hexadecimal.
    ///
    /// # Errors
    ///
    /// If the input can't be read, a mnemonic has no opcode, or an opcode
    /// isn't a hex byte.
    pub fn load<R: Read>(mut source: R) -> Result<Self> {
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .map_err(AsmError::OpTableRead)?;

        let mut table = Self::new();
        let mut tokens = text.split_whitespace();
        while let Some(mnemonic) = tokens.next() {
            let opcode = tokens
                .next()
                .ok_or_else(|| AsmError::MalformedOpTable(mnemonic.to_owned()))?;
            let value =
                u8::from_str_radix(opcode, 16).map_err(|_| AsmError::InvalidOpcode {
                    mnemonic: mnemonic.to_owned(),
                    opcode: opcode.to_owned(),
                })?;
            table.insert(mnemonic.to_owned(), value);
        }

        debug!("loaded {} operations", table.len());
        Ok(table)
    }

    /// # Errors
    ///
    /// If the file can't be opened, or on any error from [`OpTable::load`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AsmError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::load(BufReader::new(file))
    }

    /// Adds an operation. A mnemonic that is already present keeps its first
    /// opcode and is remembered as a duplicate.
    pub fn insert(&mut self, mnemonic: String, opcode: u8) {
        match self.opcodes.entry(mnemonic) {
            Entry::Occupied(entry) => self.duplicates.push(entry.key().clone()),
            Entry::Vacant(entry) => {
                entry.insert(opcode);
            }
        }
    }

    pub fn lookup(&self, mnemonic: &str) -> Option<u8> {
        self.opcodes.get(mnemonic).copied()
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.opcodes.contains_key(mnemonic)
    }

    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }
}
