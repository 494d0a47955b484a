use std::fmt::Display;

use crate::{
    directive::{Directive, OpKind},
    error::{AsmError, DiagnosticKind, Result},
    operand::Operand,
    optab::OpTable,
};

/// Label printed for literal pool entries.
pub const POOL_LABEL: &str = "*";
/// Label printed for statements without one.
pub const NO_LABEL: &str = "-";
/// Every literal takes one word in the pool.
pub const LITERAL_SIZE: usize = 3;
pub const WORD_SIZE: usize = 3;

/// One addressed statement handed from pass one to pass two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub address: usize,
    pub label: Option<String>,
    pub opcode: String,
    pub operand: Operand,
    /// Source line, `None` for literal pool entries.
    pub line: Option<usize>,
}

/// Bytes a statement occupies, plus anything wrong with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub size: usize,
    pub problem: Option<DiagnosticKind>,
}

impl Footprint {
    fn ok(size: usize) -> Self {
        Self {
            size,
            problem: None,
        }
    }

    fn with_problem(size: usize, problem: DiagnosticKind) -> Self {
        Self {
            size,
            problem: Some(problem),
        }
    }
}

impl Statement {
    pub fn literal_pool(address: usize, literal: &str) -> Self {
        Self {
            address,
            label: Some(POOL_LABEL.to_owned()),
            opcode: String::new(),
            operand: Operand::Literal(literal.to_owned()),
            line: None,
        }
    }

    pub fn kind(&self, optab: &OpTable) -> OpKind {
        OpKind::classify(optab, &self.opcode)
    }

    pub fn size(&self, optab: &OpTable) -> usize {
        self.footprint(optab).size
    }

    /// Sizing follows the opcode field. Anything that isn't an instruction or
    /// a sized directive takes one word.
    pub fn footprint(&self, optab: &OpTable) -> Footprint {
        let malformed = || DiagnosticKind::MalformedOperand {
            opcode: self.opcode.clone(),
            operand: self.operand.to_string(),
        };

        match self.kind(optab) {
            OpKind::Instruction(_) => Footprint::ok(WORD_SIZE),
            OpKind::LiteralPool => Footprint::ok(LITERAL_SIZE),
            OpKind::Directive(directive) => match directive {
                Directive::WORD => Footprint::ok(WORD_SIZE),
                Directive::RESW => match self.operand.count() {
                    Some(n) => Footprint::ok(n * WORD_SIZE),
                    None => Footprint::with_problem(0, malformed()),
                },
                Directive::RESB => match self.operand.count() {
                    Some(n) => Footprint::ok(n),
                    None => Footprint::with_problem(0, malformed()),
                },
                Directive::BYTE => match self.operand.constant_len() {
                    Some(n) => Footprint::ok(n),
                    None => Footprint::with_problem(0, malformed()),
                },
                // A leading START is placed by pass one and takes no space
                Directive::START | Directive::END => Footprint::ok(WORD_SIZE),
            },
            OpKind::Unknown => Footprint::with_problem(
                WORD_SIZE,
                DiagnosticKind::UnknownOpcode(self.opcode.clone()),
            ),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0>4X}\t{}\t{}\t{}",
            self.address,
            self.label.as_deref().unwrap_or(NO_LABEL),
            self.opcode,
            self.operand
        )
    }
}

/// Statements in source order followed by the literal pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateRepresentation {
    statements: Vec<Statement>,
}

impl IntermediateRepresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Reads back the tab separated form written by `Display`. Line numbers
    /// aren't part of that form, so they count intermediate lines instead.
    ///
    /// # Errors
    ///
    /// If a line doesn't start with a hex address.
    pub fn parse(text: &str) -> Result<Self> {
        let mut ir = Self::new();

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = || AsmError::MalformedIntermediate {
                line: line_no + 1,
                text: line.to_owned(),
            };

            let mut fields = line.split('\t');
            let address = fields
                .next()
                .and_then(|address| usize::from_str_radix(address.trim(), 16).ok())
                .ok_or_else(malformed)?;
            let label = fields
                .next()
                .map(str::trim)
                .filter(|label| !label.is_empty() && *label != NO_LABEL)
                .map(str::to_owned);
            let opcode = fields.next().map(str::trim).unwrap_or_default().to_owned();
            let operand = Operand::parse(fields.next().map(str::trim));
            let is_pool = label.as_deref() == Some(POOL_LABEL) && opcode.is_empty();

            ir.push(Statement {
                address,
                label,
                opcode,
                operand,
                line: if is_pool { None } else { Some(line_no + 1) },
            });
        }

        Ok(ir)
    }
}

impl<'a> IntoIterator for &'a IntermediateRepresentation {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl IntoIterator for IntermediateRepresentation {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl Display for IntermediateRepresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn statement(opcode: &str, operand: &str) -> Statement {
        Statement {
            address: 0x1000,
            label: None,
            opcode: opcode.to_owned(),
            operand: Operand::parse(Some(operand)),
            line: Some(1),
        }
    }

    #[test]
    fn statement_sizes() {
        let optab = OpTable::sic();
        assert_eq!(statement("ADD", "FIVE").size(&optab), 3);
        assert_eq!(statement("WORD", "5").size(&optab), 3);
        assert_eq!(statement("RESW", "3").size(&optab), 9);
        assert_eq!(statement("RESB", "4").size(&optab), 4);
        assert_eq!(statement("BYTE", "C'EOF'").size(&optab), 3);
        assert_eq!(statement("BYTE", "X'F1'").size(&optab), 1);
        assert_eq!(statement("START", "1000").size(&optab), 3);
        assert_eq!(statement("END", "FIRST").size(&optab), 3);
        assert_eq!(Statement::literal_pool(0x1000, "=5").size(&optab), 3);
    }

    #[test]
    fn sizing_problems() {
        let optab = OpTable::sic();

        let unknown = statement("LTORG", "").footprint(&optab);
        assert_eq!(unknown.size, 3);
        assert_eq!(
            unknown.problem,
            Some(DiagnosticKind::UnknownOpcode("LTORG".into()))
        );

        let bad_count = statement("RESW", "MANY").footprint(&optab);
        assert_eq!(bad_count.size, 0);
        assert!(matches!(
            bad_count.problem,
            Some(DiagnosticKind::MalformedOperand { .. })
        ));

        let bad_byte = statement("BYTE", "X'F'").footprint(&optab);
        assert_eq!(bad_byte.size, 0);
        assert!(bad_byte.problem.is_some());
    }

    #[test]
    fn tab_separated_lines() {
        let mut ir = IntermediateRepresentation::new();
        ir.push(Statement {
            address: 0x1000,
            label: Some("COPY".into()),
            opcode: "START".into(),
            operand: Operand::parse(Some("1000")),
            line: Some(1),
        });
        ir.push(Statement {
            address: 0x1000,
            label: None,
            opcode: "LDA".into(),
            operand: Operand::parse(Some("=5")),
            line: Some(2),
        });
        ir.push(Statement::literal_pool(0x1006, "=5"));

        assert_eq!(
            ir.to_string(),
            "1000\tCOPY\tSTART\t1000\n1000\t-\tLDA\t=5\n1006\t*\t\t=5\n"
        );
    }

    #[test]
    fn parse_written_form() {
        let ir = IntermediateRepresentation::parse(
            "1000\tCOPY\tSTART\t1000\n1000\t-\tLDA\t=5\n1003\t-\tRSUB\t\n1006\t*\t\t=5\n",
        )
        .unwrap();

        assert_eq!(ir.len(), 4);
        assert_eq!(ir.statements()[1].label, None);
        assert_eq!(ir.statements()[1].operand, Operand::Literal("=5".into()));
        assert_eq!(ir.statements()[2].operand, Operand::None);
        assert_eq!(ir.statements()[3], Statement::literal_pool(0x1006, "=5"));
    }

    #[test]
    fn parse_rejects_bad_address() {
        let err = IntermediateRepresentation::parse("1000\t-\tLDA\tX\nZZZZ\t-\tLDA\tX\n")
            .unwrap_err();
        assert!(matches!(err, AsmError::MalformedIntermediate { line: 2, .. }));
    }
}
