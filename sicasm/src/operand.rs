use std::fmt::Display;

use once_cell::sync::OnceCell;
use regex::Regex;

static CONSTANT_REGEX: OnceCell<Regex> = OnceCell::new();
static CONSTANT_REGEX_PATTERN: &str =
    r#"^(?:X'(?P<bytes>(?:[0-9A-Fa-f]{2})*)'|C'(?P<chars>[^']*)')$"#;
static NUMERIC_REGEX: OnceCell<Regex> = OnceCell::new();
static NUMERIC_REGEX_PATTERN: &str = r#"^-?[0-9]+$"#;

fn constant_regex() -> &'static Regex {
    CONSTANT_REGEX
        .get_or_init(|| Regex::new(CONSTANT_REGEX_PATTERN).expect("Invalid constant regex"))
}

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| Regex::new(NUMERIC_REGEX_PATTERN).expect("Invalid numeric regex"))
}

/// An operand field, classified once when the line is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    None,
    Numeric(i32),
    HexConstant(Vec<u8>),
    /// Raw character bytes of a `C'..'` constant.
    CharConstant(Vec<u8>),
    /// Full literal text, `=` included.
    Literal(String),
    Symbol(String),
}

impl Operand {
    pub fn parse(arg: Option<&str>) -> Self {
        let Some(arg) = arg.filter(|arg| !arg.is_empty()) else {
            return Self::None;
        };

        if arg.starts_with('=') {
            return Self::Literal(arg.to_owned());
        }

        if numeric_regex().is_match(arg) {
            if let Ok(n) = arg.parse() {
                return Self::Numeric(n);
            }
        }

        if let Some(captures) = constant_regex().captures(arg) {
            if let Some(bytes) = captures.name("bytes") {
                let bytes = bytes
                    .as_str()
                    .as_bytes()
                    .chunks(2)
                    .map(|pair| {
                        std::str::from_utf8(pair)
                            .ok()
                            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    })
                    .collect::<Option<Vec<_>>>();
                if let Some(bytes) = bytes {
                    return Self::HexConstant(bytes);
                }
            } else if let Some(chars) = captures.name("chars") {
                return Self::CharConstant(chars.as_str().as_bytes().to_vec());
            }
        }

        Self::Symbol(arg.to_owned())
    }

    /// Bytes a `BYTE` directive reserves for this operand, if it is a constant.
    pub fn constant_len(&self) -> Option<usize> {
        match self {
            Operand::HexConstant(bytes) | Operand::CharConstant(bytes) => Some(bytes.len()),
            _ => None,
        }
    }

    /// A non-negative count, as taken by `RESW` and `RESB`.
    pub fn count(&self) -> Option<usize> {
        match self {
            Operand::Numeric(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    /// The symbol this operand refers to, without an `,X` index suffix.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Operand::Symbol(text) => Some(text.strip_suffix(",X").unwrap_or(text)),
            _ => None,
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Numeric(n) => write!(f, "{}", n),
            Operand::HexConstant(bytes) => {
                write!(f, "X'")?;
                for byte in bytes {
                    write!(f, "{:0>2X}", byte)?;
                }
                write!(f, "'")
            }
            Operand::CharConstant(chars) => {
                write!(f, "C'{}'", String::from_utf8_lossy(chars))
            }
            Operand::Literal(text) | Operand::Symbol(text) => write!(f, "{}", text),
        }
    }
}
