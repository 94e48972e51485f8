//! Instruction Encoder
//!
//! Packs fields into 32-bit instruction words. This is the exact inverse of
//! [`decode`](crate::cpu::decoder::decode) for every field combination that
//! respects the field widths.
//!
//! Out-of-range values are rejected with [`EncodeError::FieldOutOfRange`]
//! instead of being masked, so a packed word never silently loses bits.
//!
//! Besides the family-level functions there is one helper per mnemonic:
//! - register helpers take `(rs, rt, rd)`
//! - shift helpers take `(rs, rd, shamt)`; the shifted value comes from `rs`
//! - immediate helpers take `(rs, rt, imm)`
//! - jump helpers take the 26-bit `addr`

use crate::cpu::decoder::{Fields, Instruction};
use crate::cpu::isa::{self, Field, Format, Funct, Opcode, Reg};
use crate::error::EncodeError;

fn check(field: Field, value: u32) -> Result<u32, EncodeError> {
    if value > field.max() {
        return Err(EncodeError::FieldOutOfRange {
            field: field.name,
            value,
            max: field.max(),
        });
    }
    Ok(field.place(value))
}

fn expect_format(opcode: u8, expected: Format) -> Result<u32, EncodeError> {
    let word = check(isa::OPCODE, u32::from(opcode))?;
    if isa::classify(opcode) != Some(expected) {
        return Err(EncodeError::WrongFormat { opcode, expected });
    }
    Ok(word)
}

/// Pack a register-type (SPECIAL) instruction. `funct` is the raw 6-bit code.
pub fn encode_register(rs: Reg, rt: Reg, rd: Reg, shamt: u8, funct: u8) -> Result<u32, EncodeError> {
    Ok(isa::OPCODE.place(u32::from(Opcode::Special.bits()))
        | isa::RS.place(u32::from(rs.index()))
        | isa::RT.place(u32::from(rt.index()))
        | isa::RD.place(u32::from(rd.index()))
        | check(isa::SHAMT, u32::from(shamt))?
        | check(isa::FUNCT, u32::from(funct))?)
}

/// Pack an immediate-type instruction.
pub fn encode_immediate(opcode: u8, rs: Reg, rt: Reg, imm: u16) -> Result<u32, EncodeError> {
    Ok(expect_format(opcode, Format::Immediate)?
        | isa::RS.place(u32::from(rs.index()))
        | isa::RT.place(u32::from(rt.index()))
        | isa::IMM.place(u32::from(imm)))
}

/// Pack a jump-type instruction.
pub fn encode_jump(opcode: u8, addr: u32) -> Result<u32, EncodeError> {
    Ok(expect_format(opcode, Format::Jump)? | check(isa::ADDR, addr)?)
}

/// Pack a decoded instruction back into its word.
///
/// An unclassified opcode with no fields packs to the bare opcode, which
/// decodes back to the same record.
pub fn encode(inst: &Instruction) -> Result<u32, EncodeError> {
    match inst.fields {
        Fields::Register { rs, rt, rd, shamt, funct } => {
            expect_format(inst.opcode, Format::Register)?;
            encode_register(rs, rt, rd, shamt, funct)
        }
        Fields::Immediate { rs, rt, imm } => encode_immediate(inst.opcode, rs, rt, imm),
        Fields::Jump { addr } => encode_jump(inst.opcode, addr),
        Fields::Unclassified => match isa::classify(inst.opcode) {
            Some(format) => Err(EncodeError::MissingFields {
                opcode: inst.opcode,
                format,
            }),
            None => check(isa::OPCODE, u32::from(inst.opcode)),
        },
    }
}

impl Instruction {
    /// Pack this instruction into its 32-bit word.
    pub fn encode(&self) -> Result<u32, EncodeError> {
        encode(self)
    }
}

macro_rules! register_helpers {
    ($($(#[$meta:meta])* $name:ident => $funct:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(rs: u8, rt: u8, rd: u8) -> Result<u32, EncodeError> {
                encode_register(Reg::new(rs)?, Reg::new(rt)?, Reg::new(rd)?, 0, Funct::$funct.bits())
            }
        )*
    };
}

// Fixed shifts read `rs` and write `rd`; `rt` is unused and packed as 0.
macro_rules! shift_helpers {
    ($($name:ident => $funct:ident),* $(,)?) => {
        $(
            pub fn $name(rs: u8, rd: u8, shamt: u8) -> Result<u32, EncodeError> {
                encode_register(Reg::new(rs)?, Reg::ZERO, Reg::new(rd)?, shamt, Funct::$funct.bits())
            }
        )*
    };
}

macro_rules! immediate_helpers {
    ($($name:ident => $opcode:ident),* $(,)?) => {
        $(
            pub fn $name(rs: u8, rt: u8, imm: u16) -> Result<u32, EncodeError> {
                encode_immediate(Opcode::$opcode.bits(), Reg::new(rs)?, Reg::new(rt)?, imm)
            }
        )*
    };
}

macro_rules! jump_helpers {
    ($($name:ident => $opcode:ident),* $(,)?) => {
        $(
            pub fn $name(addr: u32) -> Result<u32, EncodeError> {
                encode_jump(Opcode::$opcode.bits(), addr)
            }
        )*
    };
}

register_helpers! {
    /// Trapping add.
    add => Add,
    /// Non-trapping add.
    addu => Addu,
    sub => Sub,
    subu => Subu,
    and => And,
    or => Or,
    xor => Xor,
    nor => Nor,
    sllv => Sllv,
    srlv => Srlv,
    srav => Srav,
    slt => Slt,
    sltu => Sltu,
    jr => Jr,
    jalr => Jalr,
    mfhi => Mfhi,
    mflo => Mflo,
    mthi => Mthi,
    mtlo => Mtlo,
}

shift_helpers! {
    sll => Sll,
    srl => Srl,
    sra => Sra,
}

immediate_helpers! {
    addi => Addi,
    addiu => Addiu,
    slti => Slti,
    sltiu => Sltiu,
    andi => Andi,
    ori => Ori,
    xori => Xori,
    llo => Llo,
    lhi => Lhi,
    beq => Beq,
    bne => Bne,
    blez => Blez,
    bgtz => Bgtz,
    lb => Lb,
    lh => Lh,
    lw => Lw,
    lbu => Lbu,
    lhu => Lhu,
    sb => Sb,
    sh => Sh,
    sw => Sw,
}

jump_helpers! {
    j => J,
    jal => Jal,
    trap => Trap,
}
