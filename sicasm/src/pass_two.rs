use std::mem;

use log::{debug, info};

use crate::{
    directive::{Directive, OpKind},
    error::{Diagnostic, DiagnosticKind, Diagnostics},
    intermediate::{IntermediateRepresentation, Statement},
    literals::LiteralTable,
    operand::Operand,
    optab::OpTable,
    pass_one::PassOne,
    record::{Payload, Record},
    symbols::SymbolTable,
};

/// Result of a complete run: the object records plus the tables and
/// intermediate statements they were produced from.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub program_name: Option<String>,
    pub start_address: usize,
    pub length: usize,
    pub records: Vec<Record>,
    pub symbols: SymbolTable,
    pub literals: LiteralTable,
    pub intermediate: IntermediateRepresentation,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    /// One record per line.
    pub fn object_program(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }
}

struct PassTwo<'a> {
    optab: &'a OpTable,
    records: Vec<Record>,
    diagnostics: Diagnostics,
    pass_one: PassOne,
}

impl<'a> PassTwo<'a> {
    fn new(optab: &'a OpTable, mut pass_one: PassOne) -> Self {
        let diagnostics = mem::take(&mut pass_one.diagnostics);
        let records = vec![Record::Header {
            start: pass_one.start_address,
            length: pass_one.program_length(),
        }];

        Self {
            optab,
            records,
            diagnostics,
            pass_one,
        }
    }

    fn assemble_lines(mut self) -> Assembly {
        let intermediate = mem::take(&mut self.pass_one.intermediate);
        for statement in &intermediate {
            if let Some(payload) = self.assemble_line(statement) {
                debug!("{:0>4X} {}", statement.address, payload);
                self.records.push(Record::Text {
                    address: statement.address,
                    payload,
                });
            }
        }

        self.records.push(Record::End {
            start: self.pass_one.start_address,
        });

        info!(
            "pass two: {} records, {} diagnostics",
            self.records.len(),
            self.diagnostics.iter().count()
        );

        let length = self.pass_one.program_length();
        Assembly {
            program_name: self.pass_one.program_name,
            start_address: self.pass_one.start_address,
            length,
            records: self.records,
            symbols: self.pass_one.symbols,
            literals: self.pass_one.literals,
            intermediate,
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    /// The text payload for one statement, if it carries one. Directives
    /// that only reserve space, and unknown opcodes, produce nothing. `WORD`
    /// and `BYTE` always produce a record, zero when the operand is unusable.
    fn assemble_line(&mut self, statement: &Statement) -> Option<Payload> {
        match statement.kind(self.optab) {
            OpKind::Instruction(opcode) => {
                if let Some(symbol) = statement.operand.symbol() {
                    if !self.pass_one.symbols.contains(symbol) {
                        self.report(statement, DiagnosticKind::UndefinedSymbol(symbol.to_owned()));
                    }
                }
                Some(Payload::Opcode(opcode))
            }
            OpKind::Directive(Directive::WORD) => Some(self.word(statement)),
            OpKind::Directive(Directive::BYTE) => Some(self.byte(statement)),
            _ => match statement.operand {
                Operand::Literal(ref literal) => match self.pass_one.literals.address(literal) {
                    Some(address) => Some(Payload::Address(address)),
                    None => {
                        self.report(statement, DiagnosticKind::UnresolvedLiteral(literal.clone()));
                        None
                    }
                },
                _ => None,
            },
        }
    }

    fn word(&mut self, statement: &Statement) -> Payload {
        match statement.operand {
            Operand::Numeric(n) => Payload::Word(n),
            Operand::Symbol(ref symbol) => match self.pass_one.symbols.get(symbol) {
                Some(address) => Payload::Address(address),
                None => {
                    self.report(statement, DiagnosticKind::UndefinedSymbol(symbol.clone()));
                    Payload::Word(0)
                }
            },
            _ => {
                self.report(statement, malformed(statement));
                Payload::Word(0)
            }
        }
    }

    /// A constant's last byte. Wider constants are reported and truncated.
    fn byte(&mut self, statement: &Statement) -> Payload {
        match statement.operand {
            Operand::HexConstant(ref bytes) | Operand::CharConstant(ref bytes) => {
                if bytes.len() > 1 {
                    self.report(
                        statement,
                        DiagnosticKind::ByteOverflow(statement.operand.to_string()),
                    );
                }
                Payload::Byte(bytes.last().copied().unwrap_or(0))
            }
            // Already reported when pass one sized it
            _ => Payload::Byte(0),
        }
    }

    fn report(&mut self, statement: &Statement, kind: DiagnosticKind) {
        self.diagnostics.report(statement.line, kind);
    }
}

fn malformed(statement: &Statement) -> DiagnosticKind {
    DiagnosticKind::MalformedOperand {
        opcode: statement.opcode.clone(),
        operand: statement.operand.to_string(),
    }
}

/// Produces the header, one text record per emitting statement, and the end
/// record.
pub fn pass_two(optab: &OpTable, pass_one: PassOne) -> Assembly {
    let pass = PassTwo::new(optab, pass_one);
    pass.assemble_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass_one::pass_one;

    fn assemble(program: &str) -> Assembly {
        let optab = OpTable::sic();
        pass_two(&optab, pass_one(&optab, program))
    }

    fn lines(assembly: &Assembly) -> Vec<String> {
        assembly.records.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn simple_program() {
        let program = r#"
LABEL1  START   1000
LABEL1  ADD     FIVE
FIVE    WORD    5
        END     LABEL1
        "#;
        let assembly = assemble(program);

        assert_eq!(
            lines(&assembly),
            vec!["H001000000009", "T00100018", "T001003000005", "E001000"]
        );
        assert_eq!(assembly.symbols.get("FIVE"), Some(0x1003));
        assert!(assembly.diagnostics.is_empty());
    }

    #[test]
    fn literal_pool_records() {
        let program = r#"
P       START   0
        LDA     =5
        ADD     =5
        END     P
        "#;
        let assembly = assemble(program);

        assert_eq!(
            lines(&assembly),
            vec![
                "H00000000000C",
                "T00000000",
                "T00000318",
                "T000009000009",
                "E000000"
            ]
        );
    }

    #[test]
    fn byte_and_word_payloads() {
        let program = r#"
P       START   200
        LDA     NEG
NEG     WORD    -2
PTR     WORD    NEG
EOF     BYTE    C'EOF'
OUT     BYTE    X'F1'
BUF     RESB    10
        END     P
        "#;
        let assembly = assemble(program);

        assert_eq!(
            lines(&assembly),
            vec![
                "H00020000001A",
                "T00020000",
                "T000203FFFFFE",
                "T000206000203",
                "T00020946",
                "T00020CF1",
                "E000200"
            ]
        );
        assert_eq!(
            assembly.diagnostics[0].kind,
            DiagnosticKind::ByteOverflow("C'EOF'".into())
        );
        assert_eq!(assembly.diagnostics[0].line, Some(6));
        assert_eq!(assembly.diagnostics.len(), 1);
    }

    #[test]
    fn byte_payloads_are_two_digits() {
        let assembly = assemble("P START 0
EOF BYTE C'EOF'
H BYTE X'05F1'
ONE BYTE X'F1'
");

        assert_eq!(
            lines(&assembly),
            vec!["H000000000006", "T00000046", "T000003F1", "T000005F1", "E000000"]
        );
        let kinds = assembly
            .diagnostics
            .iter()
            .map(|d| d.kind.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::ByteOverflow("C'EOF'".into()),
                DiagnosticKind::ByteOverflow("X'05F1'".into())
            ]
        );
    }

    #[test]
    fn unusable_word_and_byte_operands_still_emit() {
        let program = "P START 0
A WORD C'A'
B WORD
C WORD NOWHERE
D BYTE 7
";
        let assembly = assemble(program);

        assert_eq!(
            lines(&assembly),
            vec![
                "H000000000009",
                "T000000000000",
                "T000003000000",
                "T000006000000",
                "T00000900",
                "E000000"
            ]
        );
        let kinds = assembly
            .diagnostics
            .iter()
            .map(|d| d.kind.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MalformedOperand {
                    opcode: "BYTE".into(),
                    operand: "7".into()
                },
                DiagnosticKind::MalformedOperand {
                    opcode: "WORD".into(),
                    operand: "C'A'".into()
                },
                DiagnosticKind::MalformedOperand {
                    opcode: "WORD".into(),
                    operand: String::new()
                },
                DiagnosticKind::UndefinedSymbol("NOWHERE".into())
            ]
        );
    }

    #[test]
    fn undefined_symbols_are_reported() {
        let program = "P START 0\n LDA MISSING\nW WORD NOWHERE\n END P\n";
        let assembly = assemble(program);

        assert_eq!(
            lines(&assembly),
            vec!["H000000000009", "T00000000", "T000003000000", "E000000"]
        );
        let kinds = assembly
            .diagnostics
            .iter()
            .map(|d| d.kind.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UndefinedSymbol("MISSING".into()),
                DiagnosticKind::UndefinedSymbol("NOWHERE".into())
            ]
        );
        assert_eq!(assembly.diagnostics[0].line, Some(2));
    }

    #[test]
    fn unresolved_literal_is_reported_and_skipped() {
        let optab = OpTable::sic();
        let mut first = pass_one(&optab, "P START 0\n LDA =5\n END P\n");
        first.literals = LiteralTable::new();

        let assembly = pass_two(&optab, first);

        assert_eq!(
            assembly
                .records
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["H000000000009", "T00000000", "E000000"]
        );
        assert_eq!(assembly.diagnostics.len(), 1);
        assert_eq!(assembly.diagnostics[0].line, None);
        assert_eq!(
            assembly.diagnostics[0].kind,
            DiagnosticKind::UnresolvedLiteral("=5".into())
        );
    }

    #[test]
    fn duplicate_label_still_assembles() {
        let program = r#"
P       START   1000
LOOP    LDA     FIVE
LOOP    ADD     FIVE
FIVE    WORD    5
        END     P
        "#;
        let assembly = assemble(program);

        assert_eq!(assembly.symbols.get("LOOP"), Some(0x1000));
        assert_eq!(assembly.diagnostics.len(), 1);
        assert_eq!(
            lines(&assembly),
            vec![
                "H00100000000C",
                "T00100000",
                "T00100318",
                "T001006000005",
                "E001000"
            ]
        );
    }

    #[test]
    fn records_stay_inside_program() {
        let assembly = assemble(include_str!("../programs/copy.sic"));
        let end = assembly.start_address + assembly.length;

        for record in &assembly.records {
            if let Record::Text { address, .. } = record {
                assert!(*address >= assembly.start_address && *address <= end);
            }
        }
    }
}
