//! Physical word layout for the Fermi-class (SM 2.x) 64-bit instruction.
//!
//! The hardware formats are overlapping views of one 8-byte word: every
//! variant shares the low control fields (op0, mod0, pred, dst, src1, op1)
//! and reinterprets the middle/high ranges. The views alias, so switching
//! format between instructions never clears anything by itself; the encoder
//! must write every field its format claims, each time.

use serde::{Deserialize, Serialize};

pub const WORD_BYTES: usize = 8;

/// The encoded instruction word: a little-endian byte buffer with explicit
/// bit-range accessors per layout variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstWord {
    bytes: [u8; WORD_BYTES],
}

impl InstWord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8; WORD_BYTES] {
        &self.bytes
    }

    /// The i-th 32-bit half, for diagnostics.
    pub fn word32(&self, i: usize) -> u32 {
        let off = i * 4;
        u32::from_le_bytes([
            self.bytes[off],
            self.bytes[off + 1],
            self.bytes[off + 2],
            self.bytes[off + 3],
        ])
    }

    fn set_bits(&mut self, lo: u32, width: u32, value: u64) {
        debug_assert!(width >= 1 && lo + width <= 64);
        let mask = (u64::MAX >> (64 - width)) << lo;
        let mut w = u64::from_le_bytes(self.bytes);
        w = (w & !mask) | ((value << lo) & mask);
        self.bytes = w.to_le_bytes();
    }

    fn bits(&self, lo: u32, width: u32) -> u64 {
        (u64::from_le_bytes(self.bytes) >> lo) & (u64::MAX >> (64 - width))
    }

    // Fields shared by every layout variant.
    pub fn set_op0(&mut self, v: u64) {
        self.set_bits(0, 4, v) // [3:0]
    }
    pub fn set_mod0(&mut self, v: u64) {
        self.set_bits(4, 6, v) // [9:4]
    }
    pub fn set_pred(&mut self, v: u64) {
        self.set_bits(10, 4, v) // [13:10]
    }
    pub fn set_dst(&mut self, v: u64) {
        self.set_bits(14, 6, v) // [19:14]
    }
    pub fn set_src1(&mut self, v: u64) {
        self.set_bits(20, 6, v) // [25:20]
    }
    pub fn set_op1(&mut self, v: u64) {
        self.set_bits(58, 6, v) // [63:58]
    }

    // general0 view.
    pub fn set_src2(&mut self, v: u64) {
        self.set_bits(26, 20, v) // [45:26]
    }
    pub fn set_src2_mod(&mut self, v: u64) {
        self.set_bits(46, 2, v) // [47:46]
    }
    pub fn set_dst_cc(&mut self, v: u64) {
        self.set_bits(48, 1, v) // [48]
    }
    pub fn set_mod1(&mut self, v: u64) {
        self.set_bits(49, 9, v) // [57:49]
    }
    /// mod1-B view: third source register over the low mod1 bits.
    pub fn set_src3(&mut self, v: u64) {
        self.set_bits(49, 6, v) // [54:49]
    }

    // Data-width slots inside mod0 (general0 view): bit [5] is wide-1,
    // bit [7] is wide-2; set means signed.
    pub fn set_wide1(&mut self, signed: bool) {
        self.set_bits(5, 1, signed as u64)
    }
    pub fn set_wide2(&mut self, signed: bool) {
        self.set_bits(7, 1, signed as u64)
    }

    // general1 view.
    pub fn set_r(&mut self, v: u64) {
        self.set_bits(49, 3, v) // [51:49]
    }
    pub fn set_logic(&mut self, v: u64) {
        self.set_bits(52, 2, v) // [53:52]
    }
    pub fn set_cmp(&mut self, v: u64) {
        self.set_bits(54, 4, v) // [57:54]
    }

    // offs view.
    pub fn set_offset(&mut self, v: u64) {
        self.set_bits(26, 16, v) // [41:26]
    }
    pub fn set_offs_mod1(&mut self, v: u64) {
        self.set_bits(42, 16, v) // [57:42]
    }

    // imm view.
    pub fn set_imm32(&mut self, v: u64) {
        self.set_bits(26, 32, v) // [57:26]
    }

    // mod0-C view.
    pub fn set_shamt(&mut self, v: u64) {
        self.set_bits(5, 5, v) // [9:5]
    }

    /// Merge the predicate-output flag into dst[2:0], keeping dst[5:3].
    pub fn merge_dst_q(&mut self, v: u64) {
        let cur = self.bits(14, 6);
        self.set_bits(14, 6, (v & 0x7) | (cur & 0x38));
    }

    /// Merge a predicate register into dst[5:3], keeping dst[2:0].
    pub fn merge_dst_p(&mut self, v: u64) {
        let cur = self.bits(14, 6);
        self.set_bits(14, 6, ((v & 0x7) << 3) | (cur & 0x7));
    }
}
