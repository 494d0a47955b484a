use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
pub use serde_json::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SdbLine {
    pub address: u32,
    pub text: String,
    /// Source line, absent for literal pool entries.
    pub line_number: Option<usize>,
}

/// Debug info written next to an object program.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sdb {
    pub name: Option<String>,
    pub start: usize,
    pub length: usize,
    pub lines: Vec<SdbLine>,
    pub symbols: IndexMap<String, u32>,
    pub literals: IndexMap<String, u32>,
}

impl Sdb {
    pub fn new(name: Option<&str>, start: usize, length: usize) -> Self {
        Sdb {
            name: name.map(Into::into),
            start,
            length,
            lines: Vec::new(),
            symbols: IndexMap::new(),
            literals: IndexMap::new(),
        }
    }

    pub fn to_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_string(dbg: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(dbg)
    }

    pub fn add_symbol(&mut self, label: String, address: u32) {
        self.symbols.insert(label, address);
    }

    pub fn add_literal(&mut self, literal: String, address: u32) {
        self.literals.insert(literal, address);
    }

    pub fn add_line(&mut self, address: u32, text: String, line_number: Option<usize>) {
        self.lines.push(SdbLine {
            address,
            text,
            line_number,
        });
    }

    /// The last line assigned to `address`. Zero-sized statements share an
    /// address with the line after them, so the later one wins.
    pub fn line_at(&self, address: u32) -> Option<&SdbLine> {
        self.lines.iter().rev().find(|line| line.address == address)
    }
}
