use std::{env, path::PathBuf};

pub const OPTAB_VAR: &str = "SICASM_OPTAB";
pub const DUMP_TABLES_VAR: &str = "SICASM_DUMP_TABLES";

/// Settings read from the environment (and a `.env` file, if present).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Operation table file. The built-in SIC table is used when unset.
    pub optab_path: Option<PathBuf>,
    /// Also write the intermediate file and the symbol and literal tables.
    pub dump_tables: bool,
}

impl Config {
    pub fn from_env() -> Self {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        Self::from_vars(env::var(OPTAB_VAR).ok(), env::var(DUMP_TABLES_VAR).ok())
    }

    fn from_vars(optab: Option<String>, dump_tables: Option<String>) -> Self {
        Self {
            optab_path: optab.filter(|path| !path.is_empty()).map(PathBuf::from),
            dump_tables: dump_tables.as_deref().map(parse_flag).unwrap_or(false),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
