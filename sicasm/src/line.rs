use crate::{directive::OpKind, optab::OpTable};

/// The fields of one source line, borrowed from the line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub label: Option<&'a str>,
    pub opcode: &'a str,
    pub operand: Option<&'a str>,
}

impl<'a> SourceLine<'a> {
    /// Splits a line into label, opcode and operand. Returns `None` for blank
    /// and comment lines.
    ///
    /// Indented lines have no label. Otherwise a two-field line is read as
    /// `opcode operand` when the first field is a mnemonic or a directive,
    /// and as `label opcode` when it isn't.
    pub fn split(text: &'a str, optab: &OpTable) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('.') {
            return None;
        }

        let indented = text.starts_with(char::is_whitespace);
        let fields = trimmed.split_whitespace().take(3).collect::<Vec<_>>();

        let (label, opcode, operand) = match (indented, fields.as_slice()) {
            (true, [opcode, rest @ ..]) => (None, *opcode, rest.first().copied()),
            (false, [opcode]) => (None, *opcode, None),
            (false, [first, second]) => {
                if OpKind::classify(optab, first).is_known() {
                    (None, *first, Some(*second))
                } else {
                    (Some(*first), *second, None)
                }
            }
            (false, [label, opcode, operand, ..]) => (Some(*label), *opcode, Some(*operand)),
            _ => return None,
        };

        Some(Self {
            label: label.filter(|label| !label.starts_with('-')),
            opcode,
            operand,
        })
    }
}
