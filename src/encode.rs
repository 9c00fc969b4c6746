//! Field encoder: turns a resolved [`Inst`] into its 64-bit machine word.
//!
//! Encoding runs in four steps per instruction: format-constant bits,
//! predicate field, modifier fields, operand fields. The constant step
//! writes *every* field the format's layout claims, because layout views
//! alias the same storage (see `isa::sm20`); bits are never assumed zero.

use tracing::trace;

use crate::error::AsmError;
use crate::inst::Inst;
use crate::modifier::{DataWidth, Modifier};
use crate::operand::Operand;
use crate::table::{FormatFamily, Role};

/// Always-true value for the predicate field.
const PRED_TRUE: u64 = 0x7;

#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Reproduce the reference encoder's data-width slot handling, which
    /// re-initializes the slot cursor for every modifier-list element. In
    /// that mode the wide-2 slot is unreachable: every data-width modifier
    /// lands in wide-1, and a third occurrence is not an error.
    pub reference_slot_reset: bool,
}

/// Encode `inst` in place. Either every step completes, or the word is not
/// to be emitted; no partially encoded instruction escapes through `Err`.
pub fn encode(inst: &mut Inst, opts: EncodeOptions) -> Result<(), AsmError> {
    inst.size = inst.desc.size;
    write_format_constants(inst)?;
    write_predicate(inst);
    apply_modifiers(inst, opts)?;
    apply_operands(inst)?;
    trace!(
        format = inst.desc.name,
        word0 = inst.word.word32(0) as u64,
        word1 = inst.word.word32(1) as u64,
        "encoded"
    );
    Ok(())
}

/// Step 1: opcode-class and sub-opcode bits, plus explicit defaults for
/// every other field the format's layout variant allocates.
fn write_format_constants(inst: &mut Inst) -> Result<(), AsmError> {
    let w = &mut inst.word;
    match inst.desc.family {
        FormatFamily::FpFadd => {
            w.set_op0(0x0);
            // [4] = 0, default value for the other mod0 bits
            w.set_mod0(0x0);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            // [54:50] = 0, default value for the other mod1 bits
            w.set_mod1(0x0);
            w.set_op1(0x14);
        }
        FormatFamily::IntImad => {
            w.set_op0(0x3);
            // [4] = 0, others are default value
            w.set_mod0(0x0);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            // [55] = 0, [57] = 0; [54:49] belongs to src3
            w.set_mod1(0x0);
            w.set_op1(0x8);
        }
        FormatFamily::IntIscadd => {
            w.set_op0(0x3);
            // [4] = 0; [9:5] belongs to shamt
            w.set_mod0(0x0);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            // [54:49] = 0, [57] = 0
            w.set_mod1(0x0);
            w.set_op1(0x10);
        }
        FormatFamily::IntIsetp => {
            w.set_op0(0x3);
            // [4] = 0, [9:6] = 0
            w.set_mod0(0x2);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            w.set_r(0x0);
            w.set_logic(0x0);
            w.set_cmp(0x0);
            w.set_op1(0x3);
        }
        FormatFamily::MovMov => {
            w.set_op0(0x4);
            w.set_mod0(0x1e);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            w.set_mod1(0x0);
            w.set_op1(0xa);
        }
        FormatFamily::LdstLd => {
            // offset layout
            w.set_op0(0x5);
            // [4] = 0, others default
            w.set_mod0(0x8);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_offset(0x0);
            w.set_offs_mod1(0x0);
            // [63:59] = 10000, [58] default
            w.set_op1(0x20);
        }
        FormatFamily::LdstSt => {
            w.set_op0(0x5);
            // [4] = 0, others default
            w.set_mod0(0x8);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_offset(0x0);
            w.set_offs_mod1(0x0);
            // [63:59] = 10010, [58] default
            w.set_op1(0x24);
        }
        FormatFamily::CtrlBra => {
            // registered, but no encoder case yet: fatal, not a user error
            return Err(AsmError::UnsupportedFormat(inst.desc.family.name()));
        }
        FormatFamily::CtrlExit => {
            w.set_op0(0x7);
            w.set_mod0(0x1e);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            w.set_mod1(0x0);
            w.set_op1(0x20);
        }
        FormatFamily::MiscS2r => {
            w.set_op0(0x4);
            w.set_mod0(0x0);
            w.set_dst(0x0);
            w.set_src1(0x0);
            w.set_src2(0x0);
            w.set_src2_mod(0x0);
            w.set_dst_cc(0x0);
            w.set_mod1(0x0);
            w.set_op1(0xb);
        }
    }
    Ok(())
}

/// Step 2: predicate field at [13:10]; 7 means "always execute".
fn write_predicate(inst: &mut Inst) {
    if inst.pred >= 0 {
        inst.word.set_pred(inst.pred as u64);
    } else {
        inst.word.set_pred(PRED_TRUE);
    }
}

/// Step 3: modifier fields, in modifier-list order.
///
/// The data-width slot cursor persists across the whole list: the first
/// occurrence fills wide-1, the second wide-2. `reference_slot_reset`
/// switches to the reference's literal behavior instead (see
/// [`EncodeOptions`]).
fn apply_modifiers(inst: &mut Inst, opts: EncodeOptions) -> Result<(), AsmError> {
    let mut width_slot = 0u32;
    for m in &inst.mods {
        match *m {
            Modifier::DataWidth(dw) => {
                if inst.desc.family != FormatFamily::IntImad {
                    return Err(AsmError::ModifierNotAllowed {
                        family: m.family(),
                        format: inst.desc.name,
                    });
                }
                let signed = dw == DataWidth::S32;
                if opts.reference_slot_reset {
                    inst.word.set_wide1(signed);
                    continue;
                }
                match width_slot {
                    0 => inst.word.set_wide1(signed),
                    1 => inst.word.set_wide2(signed),
                    _ => {
                        return Err(AsmError::UnrecognizedModifierSequence(
                            "more than two data-width modifiers",
                        ))
                    }
                }
                width_slot += 1;
            }
            Modifier::Logic(l) => {
                if inst.desc.family != FormatFamily::IntIsetp {
                    return Err(AsmError::ModifierNotAllowed {
                        family: m.family(),
                        format: inst.desc.name,
                    });
                }
                inst.word.set_logic(l.field_value());
            }
            Modifier::Comparison(c) => {
                if inst.desc.family != FormatFamily::IntIsetp {
                    return Err(AsmError::ModifierNotAllowed {
                        family: m.family(),
                        format: inst.desc.name,
                    });
                }
                inst.word.set_cmp(c.field_value());
            }
        }
    }
    Ok(())
}

/// Step 4: operand fields, each operand paired with its role.
///
/// Resolution already filtered operand kinds against the role list, so the
/// `wrong` arms are unreachable through [`Inst::new`]; they stay as real
/// errors for records built some other way.
fn apply_operands(inst: &mut Inst) -> Result<(), AsmError> {
    debug_assert_eq!(inst.args.len(), inst.desc.roles.len());
    let w = &mut inst.word;
    for (position, (role, arg)) in inst.desc.roles.iter().zip(&inst.args).enumerate() {
        let wrong = AsmError::WrongOperandKindForRole {
            role: *role,
            position,
        };
        match role {
            Role::Dst => match arg {
                // [19:14]
                Operand::Reg(id) => w.set_dst(*id as u64),
                _ => return Err(wrong),
            },
            Role::Src1 => match arg {
                // [25:20]
                Operand::Reg(id) => w.set_src1(*id as u64),
                _ => return Err(wrong),
            },
            Role::Src2 => match arg {
                // [45:26], with mode tag at [47:46]
                Operand::GlobalMem { base, offset } => {
                    w.set_src2_mod(0x1);
                    w.set_src2(((*base as u64) << 16) | (*offset as u64 & 0xffff));
                }
                Operand::Reg(id) => {
                    w.set_src2_mod(0x0);
                    w.set_src2(*id as u64);
                }
                Operand::Literal(v) => {
                    w.set_src2_mod(0x2);
                    w.set_src2(*v as u64);
                }
                _ => return Err(wrong),
            },
            Role::Src2Neg => match arg {
                // sign not carried yet; mode tag left at the format default
                Operand::Reg(id) => w.set_src2(*id as u64),
                _ => return Err(wrong),
            },
            Role::Src3 => match arg {
                // [54:49]
                Operand::Reg(id) => w.set_src3(*id as u64),
                _ => return Err(wrong),
            },
            Role::Src2Special => match arg {
                Operand::Special(sr) => match sr.source_code() {
                    Some(code) => w.set_imm32(code),
                    None => return Err(AsmError::UnmappedSpecialRegister(*sr)),
                },
                _ => return Err(wrong),
            },
            Role::Src1Offset => match arg {
                // base register only; the offset component is not consumed yet
                Operand::GlobalMem { base, .. } => w.set_src1(*base as u64),
                _ => return Err(wrong),
            },
            Role::Shamt => match arg {
                // [9:5]
                Operand::Literal(v) => w.set_shamt(*v as u64),
                _ => return Err(wrong),
            },
            // Placeholder roles: accepted positionally, no bits wired yet.
            Role::Offset | Role::Imm32 => {}
            Role::Q => match arg {
                // dst[2:0], keeping dst[5:3]
                Operand::Pt(idx) => w.merge_dst_q(*idx as u64),
                _ => return Err(wrong),
            },
            Role::P => match arg {
                // dst[5:3], keeping dst[2:0]
                Operand::Pred(id) => w.merge_dst_p(*id as u64),
                _ => return Err(wrong),
            },
            Role::R => match arg {
                // [51:49]
                Operand::Pt(idx) => w.set_r(*idx as u64),
                _ => return Err(wrong),
            },
        }
    }
    Ok(())
}
