use sicdbg::Sdb;

pub mod config;
pub mod directive;
pub mod error;
pub mod intermediate;
pub mod line;
pub mod literals;
pub mod location;
pub mod operand;
pub mod optab;
pub mod pass_one;
pub mod pass_two;
pub mod record;
pub mod symbols;

pub use config::Config;
pub use error::{AsmError, Diagnostic, DiagnosticKind};
pub use optab::OpTable;
pub use pass_one::{pass_one, PassOne};
pub use pass_two::{pass_two, Assembly};

/// Assemble a SIC program from text. Problems that don't stop assembly are
/// returned as diagnostics on the result.
pub fn assemble(optab: &OpTable, program_text: &str) -> Assembly {
    pass_two(optab, pass_one(optab, program_text))
}

/// Assemble a SIC program from text into its object program.
pub fn assemble_program(optab: &OpTable, program_text: &str) -> String {
    assemble(optab, program_text).object_program()
}

/// The object program along with its debug info as JSON.
///
/// # Errors
///
/// If the debug info can't be serialized
pub fn assemble_with_debug(
    optab: &OpTable,
    program_text: &str,
) -> Result<(String, String), sicdbg::Error> {
    let assembly = assemble(optab, program_text);
    let debug = debug_info(&assembly);

    Ok((assembly.object_program(), debug.to_string()?))
}

pub fn debug_info(assembly: &Assembly) -> Sdb {
    let mut sdb = Sdb::new(
        assembly.program_name.as_deref(),
        assembly.start_address,
        assembly.length,
    );

    for statement in &assembly.intermediate {
        sdb.add_line(
            statement.address as u32,
            statement.to_string(),
            statement.line,
        );
    }
    for (label, address) in assembly.symbols.iter() {
        sdb.add_symbol(label.to_owned(), address as u32);
    }
    for (literal, address) in assembly.literals.iter() {
        if let Some(address) = address {
            sdb.add_literal(literal.to_owned(), address as u32);
        }
    }

    sdb
}
