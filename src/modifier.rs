use serde::{Deserialize, Serialize};

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataWidth {
    U32,
    S32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
    Xor,
}

impl LogicOp {
    pub fn field_value(self) -> u64 {
        match self {
            LogicOp::And => 0x0,
            LogicOp::Or => 0x1,
            LogicOp::Xor => 0x2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Eq,
    Le,
    Gt,
    Ne,
    Ge,
}

impl CmpOp {
    pub fn field_value(self) -> u64 {
        match self {
            CmpOp::Lt => 0x1,
            CmpOp::Eq => 0x2,
            CmpOp::Le => 0x3,
            CmpOp::Gt => 0x4,
            CmpOp::Ne => 0x5,
            CmpOp::Ge => 0x6,
        }
    }
}

/// A typed dot-suffix of the mnemonic. Same-family modifiers keep their
/// textual order; for formats with two data-width slots the order decides
/// which slot each occurrence lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    DataWidth(DataWidth),
    Logic(LogicOp),
    Comparison(CmpOp),
}

impl Modifier {
    /// Classify one modifier token against the three fixed vocabularies.
    /// Tokens are case-sensitive, matching the assembly syntax exactly.
    pub fn classify(token: &str) -> Result<Modifier, AsmError> {
        let m = match token {
            "U32" => Modifier::DataWidth(DataWidth::U32),
            "S32" => Modifier::DataWidth(DataWidth::S32),
            "AND" => Modifier::Logic(LogicOp::And),
            "OR" => Modifier::Logic(LogicOp::Or),
            "XOR" => Modifier::Logic(LogicOp::Xor),
            "LT" => Modifier::Comparison(CmpOp::Lt),
            "EQ" => Modifier::Comparison(CmpOp::Eq),
            "LE" => Modifier::Comparison(CmpOp::Le),
            "GT" => Modifier::Comparison(CmpOp::Gt),
            "NE" => Modifier::Comparison(CmpOp::Ne),
            "GE" => Modifier::Comparison(CmpOp::Ge),
            _ => return Err(AsmError::UnsupportedModifier(token.to_string())),
        };
        Ok(m)
    }

    pub fn family(&self) -> &'static str {
        match self {
            Modifier::DataWidth(_) => "data-width",
            Modifier::Logic(_) => "logic",
            Modifier::Comparison(_) => "comparison",
        }
    }
}

/// Split a full mnemonic token like `IMAD.U32.S32` into the base mnemonic
/// and its modifier list. An unknown modifier token fails here, before any
/// resolution or encoding is attempted.
pub fn split_mnemonic(name: &str) -> Result<(&str, Vec<Modifier>), AsmError> {
    let mut parts = name.split('.');
    // split always yields at least one element
    let base = parts.next().unwrap_or("");
    let mods = parts.map(Modifier::classify).collect::<Result<Vec<_>, _>>()?;
    Ok((base, mods))
}
