use std::str::FromStr;

use log::{debug, info};

use crate::{
    directive::Directive,
    error::{DiagnosticKind, Diagnostics},
    intermediate::{IntermediateRepresentation, Statement, LITERAL_SIZE},
    line::SourceLine,
    literals::LiteralTable,
    location::LocationCounter,
    operand::Operand,
    optab::OpTable,
    symbols::SymbolTable,
};

/// Everything pass two needs: the tables, the addressed statements and the
/// final location counter.
#[derive(Debug, Clone)]
pub struct PassOne {
    pub program_name: Option<String>,
    pub start_address: usize,
    pub end_address: usize,
    pub symbols: SymbolTable,
    pub literals: LiteralTable,
    pub intermediate: IntermediateRepresentation,
    pub diagnostics: Diagnostics,
}

impl PassOne {
    pub fn program_length(&self) -> usize {
        self.end_address - self.start_address
    }
}

pub struct FirstPass<'a> {
    optab: &'a OpTable,
    locctr: LocationCounter,
    start_address: usize,
    program_name: Option<String>,
    symbols: SymbolTable,
    literals: LiteralTable,
    intermediate: IntermediateRepresentation,
    diagnostics: Diagnostics,
}

impl<'a> FirstPass<'a> {
    fn new(optab: &'a OpTable) -> Self {
        let mut diagnostics = Diagnostics::new();
        for mnemonic in optab.duplicates() {
            diagnostics.report(None, DiagnosticKind::DuplicateMnemonic(mnemonic.clone()));
        }

        Self {
            optab,
            locctr: LocationCounter::default(),
            start_address: 0,
            program_name: None,
            symbols: SymbolTable::new(),
            literals: LiteralTable::new(),
            intermediate: IntermediateRepresentation::new(),
            diagnostics,
        }
    }

    pub fn parse_lines(optab: &'a OpTable, lines: &[&str]) -> PassOne {
        let mut pass = Self::new(optab);

        for (line_no, text) in lines.iter().enumerate() {
            let Some(line) = SourceLine::split(text, optab) else {
                continue;
            };
            let line_no = line_no + 1;
            let is_start = matches!(Directive::from_str(line.opcode), Ok(Directive::START));
            if pass.intermediate.is_empty() && is_start {
                pass.start(line, line_no);
            } else {
                pass.statement(line, line_no);
            }
        }

        pass.literal_pool();

        info!(
            "pass one: {} statements, {} symbols, {} literals, ends at {:0>4X}",
            pass.intermediate.len(),
            pass.symbols.len(),
            pass.literals.len(),
            pass.locctr.current()
        );

        PassOne {
            program_name: pass.program_name,
            start_address: pass.start_address,
            end_address: pass.locctr.current(),
            symbols: pass.symbols,
            literals: pass.literals,
            intermediate: pass.intermediate,
            diagnostics: pass.diagnostics,
        }
    }

    /// A leading START sets the load address. Its label names the program
    /// and doesn't go in the symbol table.
    fn start(&mut self, line: SourceLine, line_no: usize) {
        let raw = line.operand.unwrap_or_default();
        let start = usize::from_str_radix(raw, 16).unwrap_or_else(|_| {
            self.diagnostics.report(
                Some(line_no),
                DiagnosticKind::InvalidStartAddress(raw.to_owned()),
            );
            0
        });

        self.start_address = start;
        self.locctr = LocationCounter::new(start);
        self.program_name = line.label.map(str::to_owned);

        debug!("{:0>4X} program start", start);
        self.intermediate.push(Statement {
            address: start,
            label: line.label.map(str::to_owned),
            opcode: line.opcode.to_owned(),
            operand: Operand::parse(line.operand),
            line: Some(line_no),
        });
    }

    fn statement(&mut self, line: SourceLine, line_no: usize) {
        let operand = Operand::parse(line.operand);
        let address = self.locctr.current();

        if let Operand::Literal(ref literal) = operand {
            if self.literals.insert(literal) {
                debug!("new literal {}", literal);
            }
        }

        let directive = Directive::from_str(line.opcode).ok();
        let is_boundary = matches!(directive, Some(Directive::START | Directive::END));
        if directive == Some(Directive::START) {
            self.diagnostics
                .report(Some(line_no), DiagnosticKind::MisplacedStart);
        }

        if let Some(label) = line.label {
            if !self.optab.contains(label) && !is_boundary {
                if let Err(kept) = self.symbols.insert(label, address) {
                    self.diagnostics.report(
                        Some(line_no),
                        DiagnosticKind::DuplicateSymbol {
                            label: label.to_owned(),
                            kept,
                        },
                    );
                }
            }
        }

        let statement = Statement {
            address,
            label: line.label.map(str::to_owned),
            opcode: line.opcode.to_owned(),
            operand,
            line: Some(line_no),
        };

        let footprint = statement.footprint(self.optab);
        if let Some(problem) = footprint.problem {
            self.diagnostics.report(Some(line_no), problem);
        }

        debug!("{}", statement);
        self.intermediate.push(statement);
        self.locctr.advance(footprint.size);
    }

    /// Places every literal that still has no address after the last
    /// statement, one word each, in table order.
    fn literal_pool(&mut self) {
        for literal in self.literals.pending() {
            let address = self.locctr.advance(LITERAL_SIZE);
            self.literals.assign(&literal, address);

            let statement = Statement::literal_pool(address, &literal);
            debug!("{}", statement);
            self.intermediate.push(statement);
        }
    }
}

/// Runs pass one over program text.
pub fn pass_one(optab: &OpTable, program_text: &str) -> PassOne {
    let lines = program_text.lines().collect::<Vec<_>>();
    FirstPass::parse_lines(optab, &lines)
}
