use tracing::debug;

use crate::error::AsmError;
use crate::isa::sm20::InstWord;
use crate::modifier::{split_mnemonic, Modifier};
use crate::operand::Operand;
use crate::table::{FormatDesc, FormatTable};

/// A fully resolved instruction: predicate, chosen format, modifiers and
/// operands in source order, and the word the encoder fills in.
#[derive(Debug, Clone)]
pub struct Inst {
    /// Predicate register number, or -1 for "no predicate".
    pub pred: i32,
    pub desc: FormatDesc,
    pub mods: Vec<Modifier>,
    pub args: Vec<Operand>,
    pub size: usize,
    pub word: InstWord,
}

impl Inst {
    /// Resolve `name` (base mnemonic plus dot-separated modifiers) against
    /// the table and build the instruction record.
    ///
    /// Candidates registered under the mnemonic are tried in table order;
    /// the first whose role list matches the operand count and kinds wins.
    /// No scoring: order is priority. On failure the diagnostic from the
    /// last rejected candidate is reported.
    pub fn new(
        table: &FormatTable,
        pred: Option<u32>,
        name: &str,
        args: Vec<Operand>,
    ) -> Result<Inst, AsmError> {
        let (base, mods) = split_mnemonic(name)?;

        let mut detail = format!("unknown instruction: {base}");
        for desc in table.lookup(base) {
            if args.len() != desc.roles.len() {
                detail = format!(
                    "invalid number of arguments for {name} ({} given, {} expected)",
                    args.len(),
                    desc.roles.len()
                );
                debug!(format = desc.name, %detail, "candidate rejected");
                continue;
            }
            let mismatch = desc
                .roles
                .iter()
                .zip(&args)
                .position(|(role, arg)| !role.accepts(arg));
            if let Some(i) = mismatch {
                detail = format!(
                    "invalid kind for argument {} of {name} ({} given)",
                    i + 1,
                    args[i].kind_name()
                );
                debug!(format = desc.name, %detail, "candidate rejected");
                continue;
            }
            return Ok(Inst {
                pred: pred.map_or(-1, |p| p as i32),
                desc: desc.clone(),
                mods,
                args,
                size: desc.size,
                word: InstWord::new(),
            });
        }

        Err(AsmError::NoMatchingEncoding {
            mnemonic: base.to_string(),
            detail,
        })
    }

    /// Encoded bytes, valid after [`crate::encode::encode`] has run.
    pub fn bytes(&self) -> &[u8] {
        &self.word.bytes()[..self.size]
    }
}
