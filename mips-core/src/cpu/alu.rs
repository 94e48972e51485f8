//! Arithmetic Logic Unit
//!
//! Pure function from `(operation, rs, rt, shamt)` to `(result, overflow)`.
//!
//! # Overflow
//! ADD and SUB report two's-complement signed overflow; every other operation
//! reports `false`. The flag is advisory output: the ALU never halts or faults,
//! trapping is the caller's decision.
//!
//! For ADD, overflow is set iff both operands share a sign and the result's
//! sign differs. For SUB, iff the operands' signs differ and the result's sign
//! differs from `rs`. [`overflow_widened`] computes the same flag through
//! 33-bit signed arithmetic.

use serde::{Deserialize, Serialize};

use crate::cpu::decoder::Instruction;
use crate::cpu::isa::{Format, Funct, Opcode};

/// Operation selector for the ALU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    /// Trapping add.
    Add,
    Addu,
    /// Trapping subtract.
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    /// Shift `rs` left by `shamt`.
    Sll,
    /// Shift `rs` right by `shamt`, zero-filled.
    Srl,
    /// Shift `rs` right by `shamt`, sign-filled.
    Sra,
    /// Shift `rs` left by the low 5 bits of `rt`.
    Sllv,
    Srlv,
    Srav,
    /// Signed set-on-less-than.
    Slt,
    Sltu,
}

/// ALU output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AluOutput {
    pub result: u32,
    pub overflow: bool,
}

impl AluOutput {
    #[inline]
    const fn value(result: u32) -> Self {
        Self { result, overflow: false }
    }
}

impl AluOp {
    /// ALU operation selected by a SPECIAL funct. Jumps and HI/LO moves have none.
    pub fn from_funct(funct: Funct) -> Option<AluOp> {
        let op = match funct {
            Funct::Add => AluOp::Add,
            Funct::Addu => AluOp::Addu,
            Funct::Sub => AluOp::Sub,
            Funct::Subu => AluOp::Subu,
            Funct::And => AluOp::And,
            Funct::Or => AluOp::Or,
            Funct::Xor => AluOp::Xor,
            Funct::Nor => AluOp::Nor,
            Funct::Sll => AluOp::Sll,
            Funct::Srl => AluOp::Srl,
            Funct::Sra => AluOp::Sra,
            Funct::Sllv => AluOp::Sllv,
            Funct::Srlv => AluOp::Srlv,
            Funct::Srav => AluOp::Srav,
            Funct::Slt => AluOp::Slt,
            Funct::Sltu => AluOp::Sltu,
            Funct::Jr | Funct::Jalr | Funct::Mfhi | Funct::Mthi | Funct::Mflo | Funct::Mtlo => {
                return None
            }
        };
        Some(op)
    }

    /// ALU operation behind an arithmetic or logical immediate opcode.
    pub fn from_opcode(opcode: Opcode) -> Option<AluOp> {
        match opcode {
            Opcode::Addi => Some(AluOp::Add),
            Opcode::Addiu => Some(AluOp::Addu),
            Opcode::Slti => Some(AluOp::Slt),
            Opcode::Sltiu => Some(AluOp::Sltu),
            Opcode::Andi => Some(AluOp::And),
            Opcode::Ori => Some(AluOp::Or),
            Opcode::Xori => Some(AluOp::Xor),
            _ => None,
        }
    }

    /// ALU operation for a decoded instruction, if it has one.
    pub fn for_instruction(inst: &Instruction) -> Option<AluOp> {
        match inst.format()? {
            Format::Register => inst.funct_kind().and_then(AluOp::from_funct),
            Format::Immediate => inst.opcode().and_then(AluOp::from_opcode),
            Format::Jump => None,
        }
    }

    /// Whether this operation can raise the overflow flag.
    pub fn traps(self) -> bool {
        matches!(self, AluOp::Add | AluOp::Sub)
    }
}

#[inline]
const fn sign(value: u32) -> bool {
    value & 0x8000_0000 != 0
}

/// Evaluate one ALU operation.
///
/// # Examples
/// ```rust
/// use mips_core::cpu::alu::{execute, AluOp};
///
/// let out = execute(AluOp::Add, 0x7FFF_FFFF, 1, 0);
/// assert_eq!(out.result, 0x8000_0000);
/// assert!(out.overflow);
/// ```
#[inline]
pub fn execute(op: AluOp, rs: u32, rt: u32, shamt: u8) -> AluOutput {
    let shamt = u32::from(shamt & 0x1F);
    let var_shift = rt & 0x1F;

    match op {
        AluOp::Add => {
            let result = rs.wrapping_add(rt);
            AluOutput {
                result,
                overflow: sign(rs) == sign(rt) && sign(result) != sign(rs),
            }
        }
        AluOp::Sub => {
            let result = rs.wrapping_sub(rt);
            AluOutput {
                result,
                overflow: sign(rs) != sign(rt) && sign(result) != sign(rs),
            }
        }
        AluOp::Addu => AluOutput::value(rs.wrapping_add(rt)),
        AluOp::Subu => AluOutput::value(rs.wrapping_sub(rt)),
        AluOp::And => AluOutput::value(rs & rt),
        AluOp::Or => AluOutput::value(rs | rt),
        AluOp::Xor => AluOutput::value(rs ^ rt),
        AluOp::Nor => AluOutput::value(!(rs | rt)),
        AluOp::Sll => AluOutput::value(rs << shamt),
        AluOp::Srl => AluOutput::value(rs >> shamt),
        AluOp::Sra => AluOutput::value(((rs as i32) >> shamt) as u32),
        AluOp::Sllv => AluOutput::value(rs << var_shift),
        AluOp::Srlv => AluOutput::value(rs >> var_shift),
        AluOp::Srav => AluOutput::value(((rs as i32) >> var_shift) as u32),
        AluOp::Slt => AluOutput::value(u32::from((rs as i32) < (rt as i32))),
        AluOp::Sltu => AluOutput::value(u32::from(rs < rt)),
    }
}

/// Evaluate with a raw 6-bit funct selector.
///
/// Selectors that are not ALU functs yield `(0, false)`.
pub fn execute_raw(funct: u8, rs: u32, rt: u32, shamt: u8) -> AluOutput {
    match Funct::from_bits(funct).and_then(AluOp::from_funct) {
        Some(op) => execute(op, rs, rt, shamt),
        None => {
            log::trace!("ALU selector 0x{:02X} is not an ALU operation", funct);
            AluOutput::default()
        }
    }
}

/// Overflow flag for ADD/SUB computed through 33-bit signed arithmetic.
///
/// The operands are sign-extended, combined in wider arithmetic, and the
/// widened result is compared against its own 32-bit truncation. Returns
/// `false` for every other operation.
pub fn overflow_widened(op: AluOp, rs: u32, rt: u32) -> bool {
    let a = i64::from(rs as i32);
    let b = i64::from(rt as i32);
    let wide = match op {
        AluOp::Add => a + b,
        AluOp::Sub => a - b,
        _ => return false,
    };
    // Bit 32 of the widened result must match bit 31 of the truncated one.
    let bit32 = (wide >> 32) & 1 == 1;
    bit32 != sign(wide as u32)
}
