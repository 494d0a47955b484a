use std::fmt::Display;

/// Contents of a text record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Bare instruction opcode, two digits.
    Opcode(u8),
    /// `BYTE` value, two digits.
    Byte(u8),
    /// `WORD` value as 24-bit two's complement, six digits.
    Word(i32),
    /// Address of a pooled literal, six digits.
    Address(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header { start: usize, length: usize },
    Text { address: usize, payload: Payload },
    End { start: usize },
}

impl Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Opcode(code) | Payload::Byte(code) => write!(f, "{:0>2X}", code),
            Payload::Word(word) => {
                let [_, a, b, c] = word.to_be_bytes();
                write!(f, "{:0>2X}{:0>2X}{:0>2X}", a, b, c)
            }
            Payload::Address(address) => write!(f, "{:0>6X}", address),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Header { start, length } => write!(f, "H{:0>6X}{:0>6X}", start, length),
            Record::Text { address, payload } => write!(f, "T{:0>6X}{}", address, payload),
            Record::End { start } => write!(f, "E{:0>6X}", start),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_formats() {
        let header = Record::Header {
            start: 0x1000,
            length: 0x1E,
        };
        assert_eq!(header.to_string(), "H00100000001E");
        assert_eq!(Record::End { start: 0x1000 }.to_string(), "E001000");
    }

    #[test]
    fn payload_widths() {
        let text = |payload| Record::Text {
            address: 0x1003,
            payload,
        };
        assert_eq!(text(Payload::Opcode(0x00)).to_string(), "T00100300");
        assert_eq!(text(Payload::Opcode(0x18)).to_string(), "T00100318");
        assert_eq!(text(Payload::Byte(0xF1)).to_string(), "T001003F1");
        assert_eq!(text(Payload::Byte(0x05)).to_string(), "T00100305");
        assert_eq!(text(Payload::Word(5)).to_string(), "T001003000005");
        assert_eq!(text(Payload::Word(-1)).to_string(), "T001003FFFFFF");
        assert_eq!(text(Payload::Address(0x100C)).to_string(), "T00100300100C");
    }
}
