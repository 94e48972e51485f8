//! Instruction Decoder
//!
//! Turns a raw 32-bit instruction word into a structured [`Instruction`].
//!
//! # Decoding Algorithm
//! 1. Extract the opcode (bits 31-26)
//! 2. Classify it into one of the three encoding families
//! 3. Extract only that family's fields; every other field reads as zero
//!
//! Decoding is pure and total: every word has a defined result. Unclassified
//! opcodes produce a record carrying the opcode with all other fields zero.

use serde::{Deserialize, Serialize};

use crate::cpu::isa::{self, Format, Funct, Opcode, Reg};

/// Fields carried by the active encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fields {
    Register {
        rs: Reg,
        rt: Reg,
        rd: Reg,
        shamt: u8,
        funct: u8,
    },
    Immediate {
        rs: Reg,
        rt: Reg,
        imm: u16,
    },
    Jump {
        addr: u32,
    },
    Unclassified,
}

/// A decoded instruction: the raw opcode plus the fields of its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// Raw 6-bit opcode, kept even when it is unclassified.
    pub opcode: u8,
    pub fields: Fields,
}

/// Flat view of a decoded instruction. Fields outside the active family are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub funct: u8,
    pub imm: u16,
    pub addr: u32,
}

/// Decode a 32-bit instruction word.
///
/// # Examples
/// ```rust
/// use mips_core::cpu::decoder::decode;
/// use mips_core::cpu::isa::{Funct, Opcode};
///
/// let inst = decode(0x0022_1820); // add $3, $1, $2
/// assert_eq!(inst.opcode(), Some(Opcode::Special));
/// assert_eq!(inst.funct(), Funct::Add.bits());
/// assert_eq!((inst.rs().index(), inst.rt().index(), inst.rd().index()), (1, 2, 3));
/// ```
#[inline] // Hot path - called for every instruction
pub fn decode(word: u32) -> Instruction {
    let opcode = isa::OPCODE.extract(word) as u8;

    let fields = match isa::classify(opcode) {
        Some(Format::Register) => decode_register(word),
        Some(Format::Immediate) => decode_immediate(word),
        Some(Format::Jump) => decode_jump(word),
        None => {
            log::debug!("Unclassified opcode 0x{:02X} in word 0x{:08X}", opcode, word);
            Fields::Unclassified
        }
    };

    Instruction { opcode, fields }
}

fn decode_register(word: u32) -> Fields {
    Fields::Register {
        rs: Reg::from_field(isa::RS.extract(word)),
        rt: Reg::from_field(isa::RT.extract(word)),
        rd: Reg::from_field(isa::RD.extract(word)),
        shamt: isa::SHAMT.extract(word) as u8,
        funct: isa::FUNCT.extract(word) as u8,
    }
}

fn decode_immediate(word: u32) -> Fields {
    Fields::Immediate {
        rs: Reg::from_field(isa::RS.extract(word)),
        rt: Reg::from_field(isa::RT.extract(word)),
        imm: isa::IMM.extract(word) as u16,
    }
}

fn decode_jump(word: u32) -> Fields {
    Fields::Jump {
        addr: isa::ADDR.extract(word),
    }
}

impl Instruction {
    /// The opcode as an enum, or `None` when it is unclassified.
    #[inline]
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_bits(self.opcode)
    }

    /// The funct as an enum, for register-type instructions with a known funct.
    #[inline]
    pub fn funct_kind(&self) -> Option<Funct> {
        match self.fields {
            Fields::Register { funct, .. } => Funct::from_bits(funct),
            _ => None,
        }
    }

    /// Encoding family, or `None` when the opcode is unclassified.
    pub fn format(&self) -> Option<Format> {
        match self.fields {
            Fields::Register { .. } => Some(Format::Register),
            Fields::Immediate { .. } => Some(Format::Immediate),
            Fields::Jump { .. } => Some(Format::Jump),
            Fields::Unclassified => None,
        }
    }

    pub fn rs(&self) -> Reg {
        match self.fields {
            Fields::Register { rs, .. } | Fields::Immediate { rs, .. } => rs,
            _ => Reg::ZERO,
        }
    }

    pub fn rt(&self) -> Reg {
        match self.fields {
            Fields::Register { rt, .. } | Fields::Immediate { rt, .. } => rt,
            _ => Reg::ZERO,
        }
    }

    pub fn rd(&self) -> Reg {
        match self.fields {
            Fields::Register { rd, .. } => rd,
            _ => Reg::ZERO,
        }
    }

    pub fn shamt(&self) -> u8 {
        match self.fields {
            Fields::Register { shamt, .. } => shamt,
            _ => 0,
        }
    }

    pub fn funct(&self) -> u8 {
        match self.fields {
            Fields::Register { funct, .. } => funct,
            _ => 0,
        }
    }

    pub fn imm(&self) -> u16 {
        match self.fields {
            Fields::Immediate { imm, .. } => imm,
            _ => 0,
        }
    }

    pub fn addr(&self) -> u32 {
        match self.fields {
            Fields::Jump { addr } => addr,
            _ => 0,
        }
    }

    /// The immediate extended per the opcode's rule (sign or zero).
    pub fn imm_operand(&self) -> u32 {
        match self.opcode() {
            Some(op) => op.extend_imm(self.imm()),
            None => 0,
        }
    }

    /// Flatten into the `{opcode, rs, rt, rd, shamt, funct, imm, addr}` record.
    pub fn record(&self) -> InstructionRecord {
        InstructionRecord {
            opcode: self.opcode,
            rs: self.rs().index(),
            rt: self.rt().index(),
            rd: self.rd().index(),
            shamt: self.shamt(),
            funct: self.funct(),
            imm: self.imm(),
            addr: self.addr(),
        }
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        decode(word)
    }
}
