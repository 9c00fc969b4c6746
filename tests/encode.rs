use pretty_assertions::assert_eq;

use fermi_asm::{assemble, EncodeOptions, FormatTable, Operand, SpecialRegister};

fn field(bytes: &[u8], lo: u32, width: u32) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(bytes);
    (u64::from_le_bytes(w) >> lo) & ((1u64 << width) - 1)
}

// Field positions: op0 [3:0], mod0 [9:4], pred [13:10], dst [19:14],
// src1 [25:20], src2 [45:26], src2_mod [47:46], op1 [63:58].

#[test]
fn fadd_general0_word() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "FADD",
        vec![Operand::Reg(0), Operand::Reg(1), Operand::Reg(2)],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(b.len(), 8);
    assert_eq!(field(b, 0, 4), 0x0); // op0
    assert_eq!(field(b, 58, 6), 0x14); // op1
    assert_eq!(field(b, 4, 6), 0x0); // mod0
    assert_eq!(field(b, 49, 9), 0x0); // mod1
    assert_eq!(field(b, 10, 4), 0x7); // no predicate => always-true
    assert_eq!(field(b, 14, 6), 0); // dst = R0
    assert_eq!(field(b, 20, 6), 1); // src1 = R1
    assert_eq!(field(b, 26, 20), 2); // src2 = R2
    assert_eq!(field(b, 46, 2), 0); // src2 mode = register
}

#[test]
fn exit_with_predicate() {
    let t = FormatTable::builtin();
    let inst = assemble(&t, Some(0), "EXIT", vec![], EncodeOptions::default()).unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 10, 4), 0x0); // pred = P0
    assert_eq!(field(b, 0, 4), 0x7);
    assert_eq!(field(b, 58, 6), 0x20);
    assert_eq!(field(b, 4, 6), 0x1e);
    assert_eq!(field(b, 14, 6), 0);
    assert_eq!(field(b, 20, 6), 0);
    assert_eq!(field(b, 26, 20), 0);
    assert_eq!(field(b, 46, 2), 0);
}

#[test]
fn predicate_field_for_every_number() {
    let t = FormatTable::builtin();
    for p in 0..=6u32 {
        let inst = assemble(
            &t,
            Some(p),
            "MOV",
            vec![Operand::Reg(1), Operand::Reg(2)],
            EncodeOptions::default(),
        )
        .unwrap();
        assert_eq!(field(inst.bytes(), 10, 4), p as u64);
    }
    let inst = assemble(
        &t,
        None,
        "MOV",
        vec![Operand::Reg(1), Operand::Reg(2)],
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(field(inst.bytes(), 10, 4), 0x7);
}

#[test]
fn mov_src2_modes() {
    let t = FormatTable::builtin();
    // register
    let inst = assemble(
        &t,
        None,
        "MOV",
        vec![Operand::Reg(3), Operand::Reg(9)],
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(field(inst.bytes(), 46, 2), 0);
    assert_eq!(field(inst.bytes(), 26, 20), 9);
    // immediate
    let inst = assemble(
        &t,
        None,
        "MOV",
        vec![Operand::Reg(3), Operand::Literal(0x1234)],
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(field(inst.bytes(), 46, 2), 2);
    assert_eq!(field(inst.bytes(), 26, 20), 0x1234);
    // memory: packed base<<16 | offset, mode tag 1
    let inst = assemble(
        &t,
        None,
        "MOV",
        vec![Operand::Reg(3), Operand::GlobalMem { base: 2, offset: 0x10 }],
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(field(inst.bytes(), 46, 2), 1);
    assert_eq!(field(inst.bytes(), 26, 20), (2 << 16) | 0x10);
}

#[test]
fn ld_st_offset_layout() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "LD",
        vec![Operand::Reg(0), Operand::GlobalMem { base: 2, offset: 0x10 }],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 0, 4), 0x5);
    assert_eq!(field(b, 4, 6), 0x8);
    assert_eq!(field(b, 58, 6), 0x20); // [63:59] = 10000
    assert_eq!(field(b, 14, 6), 0); // dst = R0
    assert_eq!(field(b, 20, 6), 2); // base register
    assert_eq!(field(b, 26, 16), 0); // offset component not consumed yet

    let inst = assemble(
        &t,
        None,
        "ST",
        vec![Operand::GlobalMem { base: 4, offset: 0 }, Operand::Reg(5)],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 58, 6), 0x24); // [63:59] = 10010
    assert_eq!(field(b, 20, 6), 4);
    assert_eq!(field(b, 14, 6), 5);
}

#[test]
fn s2r_special_register_mapping() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "S2R",
        vec![Operand::Reg(1), Operand::Special(SpecialRegister::TidX)],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 0, 4), 0x4);
    assert_eq!(field(b, 58, 6), 0xb);
    assert_eq!(field(b, 14, 6), 1);
    assert_eq!(field(b, 26, 32), 33);

    let inst = assemble(
        &t,
        None,
        "S2R",
        vec![Operand::Reg(1), Operand::Special(SpecialRegister::CtaIdX)],
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(field(inst.bytes(), 26, 32), 37);
}

#[test]
fn s2r_unmapped_special_register_fails() {
    let t = FormatTable::builtin();
    let err = assemble(
        &t,
        None,
        "S2R",
        vec![Operand::Reg(1), Operand::Special(SpecialRegister::TidY)],
        EncodeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        fermi_asm::AsmError::UnmappedSpecialRegister(SpecialRegister::TidY)
    ));
}

#[test]
fn isetp_general1_fields() {
    let t = FormatTable::builtin();
    // ISETP.GT.AND P0, pt, R2, R3, pt
    let inst = assemble(
        &t,
        None,
        "ISETP.GT.AND",
        vec![
            Operand::Pred(0),
            Operand::Pt(7),
            Operand::Reg(2),
            Operand::Reg(3),
            Operand::Pt(7),
        ],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 0, 4), 0x3);
    assert_eq!(field(b, 4, 6), 0x2);
    assert_eq!(field(b, 58, 6), 0x3);
    assert_eq!(field(b, 52, 2), 0x0); // AND
    assert_eq!(field(b, 54, 4), 0x4); // GT
    assert_eq!(field(b, 49, 3), 0x7); // R = pt
    assert_eq!(field(b, 20, 6), 2); // src1
    assert_eq!(field(b, 26, 20), 3); // src2
    // dst carries P in [19:17] and Q in [16:14]
    assert_eq!(field(b, 14, 3), 0x7); // Q = pt index
    assert_eq!(field(b, 17, 3), 0x0); // P = P0
}

#[test]
fn isetp_dst_merge_keeps_both_halves() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "ISETP.LT.OR",
        vec![
            Operand::Pred(5),
            Operand::Pt(7),
            Operand::Reg(0),
            Operand::Reg(1),
            Operand::Pt(7),
        ],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 14, 6), (5 << 3) | 0x7);
    assert_eq!(field(b, 52, 2), 0x1); // OR
    assert_eq!(field(b, 54, 4), 0x1); // LT
}

#[test]
fn iscadd_shift_amount() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "ISCADD",
        vec![
            Operand::Reg(4),
            Operand::Reg(5),
            Operand::Reg(6),
            Operand::Literal(3),
        ],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 0, 4), 0x3);
    assert_eq!(field(b, 58, 6), 0x10);
    assert_eq!(field(b, 5, 5), 3); // shamt [9:5]
    assert_eq!(field(b, 14, 6), 4);
    assert_eq!(field(b, 20, 6), 5);
    assert_eq!(field(b, 26, 20), 6);
}

#[test]
fn imad_uses_src3_high_range() {
    let t = FormatTable::builtin();
    let inst = assemble(
        &t,
        None,
        "IMAD",
        vec![
            Operand::Reg(1),
            Operand::Reg(2),
            Operand::Reg(3),
            Operand::Reg(4),
        ],
        EncodeOptions::default(),
    )
    .unwrap();
    let b = inst.bytes();
    assert_eq!(field(b, 0, 4), 0x3);
    assert_eq!(field(b, 58, 6), 0x8);
    assert_eq!(field(b, 10, 4), 0x7);
    assert_eq!(field(b, 49, 6), 4); // src3 [54:49]
}

#[test]
fn encoding_is_idempotent() {
    let t = FormatTable::builtin();
    let mut inst = fermi_asm::Inst::new(
        &t,
        None,
        "IMAD.U32.S32",
        vec![
            Operand::Reg(1),
            Operand::Reg(2),
            Operand::Reg(3),
            Operand::Reg(4),
        ],
    )
    .unwrap();
    fermi_asm::encode(&mut inst, EncodeOptions::default()).unwrap();
    let first = inst.bytes().to_vec();
    fermi_asm::encode(&mut inst, EncodeOptions::default()).unwrap();
    assert_eq!(first, inst.bytes().to_vec());
}
