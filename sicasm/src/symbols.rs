use std::fmt::Display;

use indexmap::{map::Entry, IndexMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `label` at `address`. If the label is already defined the
    /// existing entry is kept and its address returned as the error.
    pub fn insert(&mut self, label: &str, address: usize) -> Result<(), usize> {
        match self.symbols.entry(label.to_owned()) {
            Entry::Occupied(entry) => Err(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(address);
                Ok(())
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.symbols.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.symbols.contains_key(label)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.symbols.iter().map(|(label, address)| (label.as_str(), *address))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Symbol Table:")?;
        writeln!(f, "Label\t\tAddress")?;
        writeln!(f, "{}", "-".repeat(24))?;
        for (label, address) in self.iter() {
            writeln!(f, "{}\t\t{:0>4X}", label, address)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn duplicate_keeps_first() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.insert("LOOP", 0x1003), Ok(()));
        assert_eq!(symbols.insert("LOOP", 0x1009), Err(0x1003));
        assert_eq!(symbols.get("LOOP"), Some(0x1003));
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn dump_in_insertion_order() {
        let mut symbols = SymbolTable::new();
        symbols.insert("ZETA", 0x1000).unwrap();
        symbols.insert("ALPHA", 0x1003).unwrap();

        assert_eq!(
            symbols.to_string(),
            "Symbol Table:\nLabel\t\tAddress\n------------------------\nZETA\t\t1000\nALPHA\t\t1003\n"
        );
    }
}
