//! Tests for ALU results and the overflow laws

mod utils;

use mips_core::cpu::alu::{execute, execute_raw, overflow_widened, AluOp, AluOutput};
use mips_core::cpu::decoder::decode;
use mips_core::cpu::encode;
use mips_core::cpu::isa::Funct;
use utils::{operand_pairs, sign};

const MAX_32U: u32 = 0xFFFF_FFFF;

#[test]
fn test_add_vectors() {
    let cases = [
        (1, 2, 3, false),
        (2, 2, 4, false),
        (4, 5, 9, false),
        (8, 8, 16, false),
        (0x7FFF_FFFF, 1, 0x8000_0000, true),
        (0x8000_0000, 0x8000_0000, 0, true),
        // -1 + 1 carries out but does not overflow
        (MAX_32U, 1, 0, false),
        (1, MAX_32U, 0, false),
    ];
    for (rs, rt, result, overflow) in cases {
        assert_eq!(
            execute(AluOp::Add, rs, rt, 0),
            AluOutput { result, overflow },
            "add 0x{:08X} 0x{:08X}",
            rs,
            rt
        );
    }
}

#[test]
fn test_addu_wraps_without_overflow() {
    assert_eq!(execute(AluOp::Addu, MAX_32U, 1, 0), AluOutput { result: 0, overflow: false });
    assert_eq!(
        execute(AluOp::Addu, 0x7FFF_FFFF, 1, 0),
        AluOutput { result: 0x8000_0000, overflow: false }
    );
}

#[test]
fn test_sub_vectors() {
    assert_eq!(execute(AluOp::Sub, 0, 1, 0), AluOutput { result: MAX_32U, overflow: true });
    assert_eq!(execute(AluOp::Sub, 5, 3, 0), AluOutput { result: 2, overflow: false });
    assert_eq!(
        execute(AluOp::Sub, 0x8000_0000, 1, 0),
        AluOutput { result: 0x7FFF_FFFF, overflow: true }
    );
    assert_eq!(execute(AluOp::Subu, 0, 1, 0), AluOutput { result: MAX_32U, overflow: false });
}

#[test]
fn test_add_overflow_law() {
    for (rs, rt) in operand_pairs() {
        let out = execute(AluOp::Add, rs, rt, 0);
        let sum = rs.wrapping_add(rt);
        assert_eq!(out.result, sum);
        assert_eq!(
            out.overflow,
            sign(rs) == sign(rt) && sign(sum) != sign(rs),
            "add 0x{:08X} 0x{:08X}",
            rs,
            rt
        );
        assert_eq!(out.overflow, overflow_widened(AluOp::Add, rs, rt));
    }
}

#[test]
fn test_sub_overflow_law() {
    for (rs, rt) in operand_pairs() {
        let out = execute(AluOp::Sub, rs, rt, 0);
        let diff = rs.wrapping_sub(rt);
        assert_eq!(out.result, diff);
        assert_eq!(
            out.overflow,
            sign(rs) != sign(rt) && sign(diff) != sign(rs),
            "sub 0x{:08X} 0x{:08X}",
            rs,
            rt
        );
        assert_eq!(out.overflow, overflow_widened(AluOp::Sub, rs, rt));
        assert_eq!(out.overflow, (rs as i32).checked_sub(rt as i32).is_none());
    }
}

#[test]
fn test_only_add_and_sub_overflow() {
    let ops = [
        AluOp::Addu,
        AluOp::Subu,
        AluOp::And,
        AluOp::Or,
        AluOp::Xor,
        AluOp::Nor,
        AluOp::Sll,
        AluOp::Srl,
        AluOp::Sra,
        AluOp::Sllv,
        AluOp::Srlv,
        AluOp::Srav,
        AluOp::Slt,
        AluOp::Sltu,
    ];
    for (rs, rt) in operand_pairs() {
        for op in ops {
            assert!(!execute(op, rs, rt, (rt & 0x1F) as u8).overflow, "{:?}", op);
            assert!(!op.traps());
        }
    }
}

#[test]
fn test_logical_ops() {
    let (a, b) = (0xF0F0_1234, 0x0FF0_FF00);
    assert_eq!(execute(AluOp::And, a, b, 0).result, a & b);
    assert_eq!(execute(AluOp::Or, a, b, 0).result, a | b);
    assert_eq!(execute(AluOp::Xor, a, b, 0).result, a ^ b);
    assert_eq!(execute(AluOp::Nor, a, b, 0).result, !(a | b));
    assert_eq!(execute(AluOp::Nor, 0, 0, 0).result, MAX_32U);
}

#[test]
fn test_fixed_shifts() {
    assert_eq!(execute(AluOp::Sll, 1, 0, 31).result, 0x8000_0000);
    assert_eq!(execute(AluOp::Sll, 0xFFFF_FFFF, 0, 4).result, 0xFFFF_FFF0);
    assert_eq!(execute(AluOp::Srl, 0x8000_0000, 0, 31).result, 1);
    assert_eq!(execute(AluOp::Sra, 0x8000_0000, 0, 31).result, MAX_32U);
    assert_eq!(execute(AluOp::Sra, 0x4000_0000, 0, 30).result, 1);
    assert_eq!(execute(AluOp::Sll, 0x1234, 0, 0).result, 0x1234);
    // shamt is a 5-bit field; rt never contributes to a fixed shift
    assert_eq!(execute(AluOp::Srl, 0x100, 0xFFFF_FFFF, 4).result, 0x10);
}

#[test]
fn test_variable_shifts_use_low_bits_of_rt() {
    assert_eq!(execute(AluOp::Sllv, 1, 4, 0).result, 0x10);
    assert_eq!(execute(AluOp::Sllv, 1, 36, 0).result, 0x10);
    assert_eq!(execute(AluOp::Srlv, 0x8000_0000, 31, 0).result, 1);
    assert_eq!(execute(AluOp::Srav, 0x8000_0000, 31, 0).result, MAX_32U);
    // shamt never contributes to a variable shift
    assert_eq!(execute(AluOp::Sllv, 1, 0, 31).result, 1);
}

#[test]
fn test_set_on_less_than() {
    assert_eq!(execute(AluOp::Slt, MAX_32U, 0, 0).result, 1);
    assert_eq!(execute(AluOp::Sltu, MAX_32U, 0, 0).result, 0);
    assert_eq!(execute(AluOp::Slt, 3, 3, 0).result, 0);
    assert_eq!(execute(AluOp::Sltu, 2, 3, 0).result, 1);
}

#[test]
fn test_unrecognized_selector_yields_zero() {
    let not_alu = [
        Funct::Jr.bits(),
        Funct::Jalr.bits(),
        Funct::Mfhi.bits(),
        Funct::Mtlo.bits(),
        0x3F,
        0x01,
    ];
    for funct in not_alu {
        assert_eq!(execute_raw(funct, 0x7FFF_FFFF, 1, 3), AluOutput::default());
    }
    assert_eq!(
        execute_raw(Funct::Add.bits(), 0x7FFF_FFFF, 1, 0),
        AluOutput { result: 0x8000_0000, overflow: true }
    );
}

#[test]
fn test_op_selection_from_instructions() {
    let cases = [
        (encode::add(1, 2, 3).unwrap(), Some(AluOp::Add)),
        (encode::srav(1, 2, 3).unwrap(), Some(AluOp::Srav)),
        (encode::addi(1, 2, 3).unwrap(), Some(AluOp::Add)),
        (encode::addiu(1, 2, 3).unwrap(), Some(AluOp::Addu)),
        (encode::sltiu(1, 2, 3).unwrap(), Some(AluOp::Sltu)),
        (encode::ori(1, 2, 3).unwrap(), Some(AluOp::Or)),
        (encode::jr(1, 0, 0).unwrap(), None),
        (encode::lw(1, 2, 3).unwrap(), None),
        (encode::j(3).unwrap(), None),
        (0xFC00_0000, None),
    ];
    for (word, expected) in cases {
        assert_eq!(AluOp::for_instruction(&decode(word)), expected, "0x{:08X}", word);
    }
}
