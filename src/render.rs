//! Diagnostic dump of a resolved instruction. Read-only; never affects the
//! encoding.

use serde::Serialize;

use crate::inst::Inst;

/// Text dump: format name, operands in order, and each 4-byte word as hex
/// plus a 32-bit binary string grouped in nibbles.
pub fn render(inst: &Inst) -> String {
    let mut out = format!("Instruction {}\n", inst.desc.name);
    for (i, arg) in inst.args.iter().enumerate() {
        out.push_str(&format!("\targ {i}: {arg}\n"));
    }
    if inst.size == 0 {
        return out;
    }
    for i in 0..inst.size / 4 {
        let word = inst.word.word32(i);
        out.push_str(&format!("\tword {i}:  hex = {{ {word:08x} }},  bin = {{"));
        for j in 0..32 {
            if j % 4 == 0 {
                out.push(' ');
            }
            out.push(if (word >> (31 - j)) & 1 != 0 { '1' } else { '0' });
        }
        out.push_str(" }\n");
    }
    out
}

/// Machine-readable summary of a resolved instruction, for JSON listings.
#[derive(Debug, Clone, Serialize)]
pub struct InstReport {
    pub format: String,
    pub pred: i32,
    pub args: Vec<String>,
    pub words: Vec<String>,
}

pub fn report(inst: &Inst) -> InstReport {
    InstReport {
        format: inst.desc.name.to_string(),
        pred: inst.pred,
        args: inst.args.iter().map(|a| a.to_string()).collect(),
        words: (0..inst.size / 4)
            .map(|i| format!("{:08x}", inst.word.word32(i)))
            .collect(),
    }
}
