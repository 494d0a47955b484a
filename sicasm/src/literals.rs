use std::fmt::Display;

use indexmap::IndexMap;

/// Literal operands keyed by their full text (`=5`, `=C'EOF'`). Addresses are
/// assigned once, when the literal pool is laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralTable {
    literals: IndexMap<String, Option<usize>>,
}

impl LiteralTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unresolved entry unless the literal is already known. Returns
    /// whether an entry was added.
    pub fn insert(&mut self, literal: &str) -> bool {
        if self.literals.contains_key(literal) {
            return false;
        }
        self.literals.insert(literal.to_owned(), None);
        true
    }

    /// Assigns an address to an unresolved literal. Resolved literals keep
    /// the address they already have.
    pub fn assign(&mut self, literal: &str, address: usize) -> bool {
        match self.literals.get_mut(literal) {
            Some(slot) if slot.is_none() => {
                *slot = Some(address);
                true
            }
            _ => false,
        }
    }

    /// Unresolved literals in table order.
    pub fn pending(&self) -> Vec<String> {
        self.literals
            .iter()
            .filter(|(_, address)| address.is_none())
            .map(|(literal, _)| literal.clone())
            .collect()
    }

    pub fn address(&self, literal: &str) -> Option<usize> {
        self.literals.get(literal).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.literals
            .iter()
            .map(|(literal, address)| (literal.as_str(), *address))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl Display for LiteralTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Literal Table:")?;
        writeln!(f, "Literal\t\tAddress")?;
        writeln!(f, "{}", "-".repeat(24))?;
        for (literal, address) in self.iter() {
            match address {
                Some(address) => writeln!(f, "{}\t\t{:0>4X}", literal, address)?,
                None => writeln!(f, "{}\t\t----", literal)?,
            }
        }
        Ok(())
    }
}
