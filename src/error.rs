use crate::operand::SpecialRegister;
use crate::table::Role;

/// Per-instruction failure. Everything here is recoverable by skipping the
/// offending instruction, except [`AsmError::UnsupportedFormat`], which means
/// the format table names a family the encoder does not implement.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("unsupported modifier: {0}")]
    UnsupportedModifier(String),

    #[error("no matching encoding for {mnemonic}: {detail}")]
    NoMatchingEncoding { mnemonic: String, detail: String },

    /// Internal: table/encoder mismatch, not a user error.
    #[error("no encoder for format {0}")]
    UnsupportedFormat(&'static str),

    /// Reserved for table-driven modifier values outside the encoder's
    /// handled set; the built-in vocabularies are closed enums, so the
    /// current classifier cannot produce one.
    #[error("unrecognized value for {family} modifier")]
    UnrecognizedModifierValue { family: &'static str },

    #[error("unrecognized modifier sequence: {0}")]
    UnrecognizedModifierSequence(&'static str),

    #[error("{family} modifier not supported by format {format}")]
    ModifierNotAllowed {
        family: &'static str,
        format: &'static str,
    },

    #[error("operand {position} has the wrong kind for {role:?}")]
    WrongOperandKindForRole { role: Role, position: usize },

    #[error("special register {0} has no source mapping")]
    UnmappedSpecialRegister(SpecialRegister),

    #[error("parse error: {0}")]
    Parse(String),
}
