//! Minimal line syntax for driving the core: one instruction per line,
//! `@P<n>` predicate prefix, dot-modified mnemonic, comma-separated
//! operands. `;` starts a comment anywhere; `#` comments a whole line.
//! Labels and symbols are not handled at this layer.

use crate::error::AsmError;
use crate::operand::{Operand, SpecialRegister};

/// One source instruction, as handed to the resolver: predicate number (if
/// any), mnemonic with its modifier suffixes still attached, operands in
/// source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInst {
    pub pred: Option<u32>,
    pub name: String,
    pub args: Vec<Operand>,
}

fn parse_num(s: &str) -> Option<i64> {
    let t = s.trim();
    let (neg, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    let v = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        t.parse::<i64>().ok()?
    };
    Some(if neg { -v } else { v })
}

fn parse_prefixed_id(s: &str, prefix: char) -> Option<u32> {
    let rest = s.strip_prefix(prefix)
        .or_else(|| s.strip_prefix(prefix.to_ascii_uppercase()))?;
    rest.parse::<u32>().ok()
}

/// Memory operand `[R<n>]` or `[R<n>+off]`.
fn parse_mem(s: &str) -> Result<Operand, AsmError> {
    let inner = s
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| AsmError::Parse(format!("expected memory operand like [R2+0x4]: {s}")))?;
    let mut parts = inner.splitn(2, '+').map(str::trim);
    let base = parts
        .next()
        .and_then(|b| parse_prefixed_id(b, 'r'))
        .ok_or_else(|| AsmError::Parse(format!("bad base register in {s}")))?;
    let offset = match parts.next() {
        Some(off) => {
            parse_num(off).ok_or_else(|| AsmError::Parse(format!("bad offset in {s}")))?
        }
        None => 0,
    };
    Ok(Operand::GlobalMem { base, offset })
}

fn parse_operand(s: &str) -> Result<Operand, AsmError> {
    let t = s.trim();
    if t.starts_with('[') {
        return parse_mem(t);
    }
    if t.eq_ignore_ascii_case("pt") {
        // always-true predicate, field index 7
        return Ok(Operand::Pt(7));
    }
    if let Some(sr) = SpecialRegister::from_name(t) {
        return Ok(Operand::Special(sr));
    }
    if let Some(id) = parse_prefixed_id(t, 'r') {
        return Ok(Operand::Reg(id));
    }
    if let Some(id) = parse_prefixed_id(t, 'p') {
        return Ok(Operand::Pred(id));
    }
    if let Some(v) = parse_num(t) {
        return Ok(Operand::Literal(v));
    }
    Err(AsmError::Parse(format!("bad operand: {t}")))
}

/// Parse one source line. `Ok(None)` means the line carries no instruction
/// (blank or comment).
pub fn parse_line(line: &str) -> Result<Option<SourceInst>, AsmError> {
    if line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let mut s = line;
    if let Some(p) = s.find(';') {
        s = &s[..p];
    }
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let mut rest = s;
    let mut pred = None;
    if let Some(tail) = rest.strip_prefix('@') {
        let (tok, tail) = match tail.split_once(char::is_whitespace) {
            Some((tok, tail)) => (tok, tail),
            None => return Err(AsmError::Parse(format!("predicate with no instruction: {s}"))),
        };
        let id = parse_prefixed_id(tok, 'p')
            .ok_or_else(|| AsmError::Parse(format!("bad predicate: @{tok}")))?;
        pred = Some(id);
        rest = tail.trim_start();
    }

    let (name, tail) = match rest.split_once(char::is_whitespace) {
        Some((name, tail)) => (name, tail.trim()),
        None => (rest, ""),
    };
    let args = if tail.is_empty() {
        Vec::new()
    } else {
        tail.split(',')
            .map(parse_operand)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Some(SourceInst {
        pred,
        name: name.to_string(),
        args,
    }))
}
