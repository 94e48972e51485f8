//! Test Utilities
//!
//! Deterministic operand generators and assertion helpers shared by the
//! integration tests.
#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use mips_core::cpu::decoder::InstructionRecord;

/// Operands at and around every sign and carry boundary.
pub const EDGE_VALUES: [u32; 12] = [
    0x0000_0000,
    0x0000_0001,
    0x0000_0002,
    0x0000_FFFF,
    0x3FFF_FFFF,
    0x4000_0000,
    0x7FFF_FFFE,
    0x7FFF_FFFF,
    0x8000_0000,
    0x8000_0001,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
];

/// Generate `count` pseudo-random words. The same seed gives the same words.
pub fn generate_random_words(seed: u64, count: usize) -> Vec<u32> {
    let mut words = Vec::with_capacity(count);
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    for i in 0..count {
        (i as u64).hash(&mut hasher);
        words.push(hasher.finish() as u32);
    }
    words
}

/// Every `(rs, rt)` pair worth checking: all edge pairs plus random pairs.
pub fn operand_pairs() -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for &a in &EDGE_VALUES {
        for &b in &EDGE_VALUES {
            pairs.push((a, b));
        }
    }
    let random = generate_random_words(0x5EED, 2048);
    pairs.extend(random.chunks_exact(2).map(|c| (c[0], c[1])));
    pairs
}

#[inline]
pub fn sign(value: u32) -> bool {
    (value as i32) < 0
}

/// Assert two decoded records match, naming the first field that differs.
pub fn assert_record_eq(expected: &InstructionRecord, actual: &InstructionRecord, message: &str) {
    let fields = [
        ("opcode", u32::from(expected.opcode), u32::from(actual.opcode)),
        ("rs", u32::from(expected.rs), u32::from(actual.rs)),
        ("rt", u32::from(expected.rt), u32::from(actual.rt)),
        ("rd", u32::from(expected.rd), u32::from(actual.rd)),
        ("shamt", u32::from(expected.shamt), u32::from(actual.shamt)),
        ("funct", u32::from(expected.funct), u32::from(actual.funct)),
        ("imm", u32::from(expected.imm), u32::from(actual.imm)),
        ("addr", expected.addr, actual.addr),
    ];
    for (name, want, got) in fields {
        assert_eq!(
            want, got,
            "{}: field `{}` differs: expected 0x{:X}, got 0x{:X}",
            message, name, want, got
        );
    }
}
