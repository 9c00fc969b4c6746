pub mod encode;
pub mod error;
pub mod inst;
pub mod modifier;
pub mod operand;
pub mod parse;
pub mod render;
pub mod table;

pub mod isa {
    pub mod sm20; // Fermi-class (SM 2.x) word layout
}

pub use encode::{encode, EncodeOptions};
pub use error::AsmError;
pub use inst::Inst;
pub use operand::{Operand, SpecialRegister};
pub use table::{FormatFamily, FormatTable, Role};

/// Resolve and encode one instruction in a single call.
pub fn assemble(
    table: &FormatTable,
    pred: Option<u32>,
    name: &str,
    args: Vec<Operand>,
    opts: EncodeOptions,
) -> Result<Inst, AsmError> {
    let mut inst = Inst::new(table, pred, name, args)?;
    encode::encode(&mut inst, opts)?;
    Ok(inst)
}
