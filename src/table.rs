use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::operand::Operand;

/// The purpose an operand position plays for a specific format. Each role
/// decides both which operand kinds are acceptable there and which bit
/// range of the word the value lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Dst,
    Src1,
    Src2,
    Src2Neg,
    Src3,
    Src2Special,
    /// Combined base+offset source; only the base register is encoded.
    Src1Offset,
    Shamt,
    /// Accepted positionally, not yet wired to any bit field.
    Offset,
    /// Accepted positionally, not yet wired to any bit field.
    Imm32,
    /// Predicate-output flag, merged into the low bits of the dst field.
    Q,
    /// Predicate register, merged into the high bits of the dst field.
    P,
    /// Second predicate input field at [51:49].
    R,
}

impl Role {
    /// Role-to-kind compatibility. Resolution filters on this, so by the
    /// time the encoder runs, every operand already fits its role.
    pub fn accepts(self, arg: &Operand) -> bool {
        match self {
            Role::Dst | Role::Src1 | Role::Src2Neg | Role::Src3 => {
                matches!(arg, Operand::Reg(_))
            }
            Role::Src2 => matches!(
                arg,
                Operand::Reg(_) | Operand::Literal(_) | Operand::GlobalMem { .. }
            ),
            Role::Src2Special => matches!(arg, Operand::Special(_)),
            Role::Src1Offset => matches!(arg, Operand::GlobalMem { .. }),
            Role::Shamt | Role::Offset | Role::Imm32 => matches!(arg, Operand::Literal(_)),
            Role::Q | Role::R => matches!(arg, Operand::Pt(_)),
            Role::P => matches!(arg, Operand::Pred(_)),
        }
    }
}

/// Group of formats sharing one physical bit-layout shape plus the
/// format-constant bits specific to the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatFamily {
    FpFadd,
    IntImad,
    IntIscadd,
    IntIsetp,
    MovMov,
    LdstLd,
    LdstSt,
    /// In the table, but the encoder has no case for it yet.
    CtrlBra,
    CtrlExit,
    MiscS2r,
}

impl FormatFamily {
    pub fn name(self) -> &'static str {
        match self {
            FormatFamily::FpFadd => "FP_FADD",
            FormatFamily::IntImad => "INT_IMAD",
            FormatFamily::IntIscadd => "INT_ISCADD",
            FormatFamily::IntIsetp => "INT_ISETP",
            FormatFamily::MovMov => "MOV_MOV",
            FormatFamily::LdstLd => "LDST_LD",
            FormatFamily::LdstSt => "LDST_ST",
            FormatFamily::CtrlBra => "CTRL_BRA",
            FormatFamily::CtrlExit => "CTRL_EXIT",
            FormatFamily::MiscS2r => "MISC_S2R",
        }
    }
}

/// One hardware encoding shape registered under a mnemonic.
#[derive(Debug, Clone)]
pub struct FormatDesc {
    pub name: &'static str,
    pub family: FormatFamily,
    pub opcode: u64,
    /// Declared byte size; 8 for every format in this ISA.
    pub size: usize,
    pub roles: &'static [Role],
}

/// Mnemonic-keyed table of format descriptors. Several descriptors may share
/// a mnemonic (an overload set); registration order is resolution priority.
#[derive(Debug, Default)]
pub struct FormatTable {
    by_name: HashMap<String, Vec<FormatDesc>>,
}

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mnemonic: &str, desc: FormatDesc) {
        self.by_name
            .entry(mnemonic.to_string())
            .or_default()
            .push(desc);
    }

    /// Candidates for a mnemonic, in registration order. Empty if unknown.
    pub fn lookup(&self, mnemonic: &str) -> &[FormatDesc] {
        self.by_name.get(mnemonic).map_or(&[], Vec::as_slice)
    }

    /// The built-in instruction set: the formats the encoder has cases for.
    pub fn builtin() -> Self {
        use Role::*;
        let mut t = Self::new();
        let mut reg =
            |mn: &str, family: FormatFamily, opcode: u64, roles: &'static [Role]| {
                t.register(
                    mn,
                    FormatDesc {
                        name: family.name(),
                        family,
                        opcode,
                        size: 8,
                        roles,
                    },
                );
            };
        reg("FADD", FormatFamily::FpFadd, 0x14, &[Dst, Src1, Src2]);
        reg("IMAD", FormatFamily::IntImad, 0x8, &[Dst, Src1, Src2, Src3]);
        reg("ISCADD", FormatFamily::IntIscadd, 0x10, &[Dst, Src1, Src2, Shamt]);
        reg("ISETP", FormatFamily::IntIsetp, 0x3, &[P, Q, Src1, Src2, R]);
        reg("MOV", FormatFamily::MovMov, 0xa, &[Dst, Src2]);
        reg("LD", FormatFamily::LdstLd, 0x20, &[Dst, Src1Offset]);
        reg("ST", FormatFamily::LdstSt, 0x24, &[Src1Offset, Dst]);
        reg("BRA", FormatFamily::CtrlBra, 0x0, &[Imm32]);
        reg("EXIT", FormatFamily::CtrlExit, 0x20, &[]);
        reg("S2R", FormatFamily::MiscS2r, 0xb, &[Dst, Src2Special]);
        t
    }
}
