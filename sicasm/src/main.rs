use anyhow::{Context, Result};
use env_logger::Env;
use sicasm::{assemble, debug_info, Config, OpTable};
use std::{env, fs};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let filename: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Need an input filename"))?;
    let output_name: String = env::args()
        .nth(2)
        .ok_or_else(|| anyhow::Error::msg("Need an output filename"))?;

    let config = Config::from_env();
    let optab = match config.optab_path {
        Some(ref path) => OpTable::from_path(path)?,
        None => OpTable::sic(),
    };

    let program_text =
        fs::read_to_string(&filename).with_context(|| format!("couldn't read {}", filename))?;

    let assembly = assemble(&optab, &program_text);
    let debug = debug_info(&assembly);

    fs::write(format!("{}.obj", output_name), assembly.object_program())?;
    fs::write(format!("{}.sdb", output_name), debug.to_string()?)?;

    if config.dump_tables {
        fs::write(
            format!("{}.int", output_name),
            assembly.intermediate.to_string(),
        )?;
        fs::write(format!("{}.sym", output_name), assembly.symbols.to_string())?;
        fs::write(format!("{}.lit", output_name), assembly.literals.to_string())?;
    }

    if !assembly.diagnostics.is_empty() {
        log::warn!(
            "{} assembled with {} diagnostics",
            filename,
            assembly.diagnostics.len()
        );
    }

    Ok(())
}
