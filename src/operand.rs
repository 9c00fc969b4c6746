use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware counters readable through S2R.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialRegister {
    TidX,
    TidY,
    TidZ,
    CtaIdX,
    CtaIdY,
    CtaIdZ,
}

impl SpecialRegister {
    /// S2R source code, for the registers the encoder knows how to map.
    /// The rest are recognized syntactically but fail at encode time.
    pub fn source_code(self) -> Option<u64> {
        match self {
            SpecialRegister::TidX => Some(33),
            SpecialRegister::CtaIdX => Some(37),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialRegister::TidX => "SR_Tid_X",
            SpecialRegister::TidY => "SR_Tid_Y",
            SpecialRegister::TidZ => "SR_Tid_Z",
            SpecialRegister::CtaIdX => "SR_CTAid_X",
            SpecialRegister::CtaIdY => "SR_CTAid_Y",
            SpecialRegister::CtaIdZ => "SR_CTAid_Z",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let all = [
            SpecialRegister::TidX,
            SpecialRegister::TidY,
            SpecialRegister::TidZ,
            SpecialRegister::CtaIdX,
            SpecialRegister::CtaIdY,
            SpecialRegister::CtaIdZ,
        ];
        all.into_iter().find(|sr| sr.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for SpecialRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One instruction operand, immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// Scalar register R<n>.
    Reg(u32),
    /// Predicate register P<n>.
    Pred(u32),
    /// Literal immediate.
    Literal(i64),
    /// Global memory address: [R<base>+offset].
    GlobalMem { base: u32, offset: i64 },
    /// Special register (thread id, block id, ...).
    Special(SpecialRegister),
    /// Always-true predicate sentinel `pt`, carrying its field index.
    Pt(u32),
}

impl Operand {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Reg(_) => "scalar register",
            Operand::Pred(_) => "predicate register",
            Operand::Literal(_) => "literal",
            Operand::GlobalMem { .. } => "memory address",
            Operand::Special(_) => "special register",
            Operand::Pt(_) => "pt",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(id) => write!(f, "R{id}"),
            Operand::Pred(id) => write!(f, "P{id}"),
            Operand::Literal(v) => write!(f, "{v:#x}"),
            Operand::GlobalMem { base, offset } => write!(f, "[R{base}+{offset:#x}]"),
            Operand::Special(sr) => write!(f, "{sr}"),
            Operand::Pt(_) => f.write_str("pt"),
        }
    }
}
