//! ISA Encoding Model
//!
//! Pure data definitions for the 32-bit instruction word: field layout,
//! opcode and funct codes, and the three encoding families.
//!
//! # Instruction Layout (MSB = 31)
//! ```text
//!  31    26 25   21 20   16 15   11 10    6 5      0
//! +--------+-------+-------+-------+-------+--------+
//! | opcode |  rs   |  rt   |  rd   | shamt | funct  |  register-type (SPECIAL)
//! +--------+-------+-------+-------+-------+--------+
//! | opcode |  rs   |  rt   |         imm            |  immediate-type
//! +--------+-------+-------+------------------------+
//! | opcode |               addr                     |  jump-type
//! +--------+----------------------------------------+
//! ```
//!
//! Every opcode belongs to exactly one of `REG_OPCODE`, `IMM_OPCODE` and
//! `JMP_OPCODE`. Opcode values outside all three are unclassified.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IsaError;

/// Bit offset and width of one instruction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: u32,
    pub width: u32,
}

impl Field {
    const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        Self { name, offset, width }
    }

    /// Mask of the field after it has been shifted down to bit 0.
    #[inline]
    pub const fn mask(&self) -> u32 {
        (1u32 << self.width) - 1
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max(&self) -> u32 {
        self.mask()
    }

    /// Extract the field from an instruction word.
    #[inline]
    pub const fn extract(&self, word: u32) -> u32 {
        (word >> self.offset) & self.mask()
    }

    /// Place an in-range value at the field's position.
    #[inline]
    pub const fn place(&self, value: u32) -> u32 {
        (value & self.mask()) << self.offset
    }
}

pub const OPCODE: Field = Field::new("opcode", 26, 6);
pub const RS: Field = Field::new("rs", 21, 5);
pub const RT: Field = Field::new("rt", 16, 5);
pub const RD: Field = Field::new("rd", 11, 5);
pub const SHAMT: Field = Field::new("shamt", 6, 5);
pub const FUNCT: Field = Field::new("funct", 0, 6);
pub const IMM: Field = Field::new("imm", 0, 16);
pub const ADDR: Field = Field::new("addr", 0, 26);

/// Fields of the register-type layout, in bit order from MSB.
pub const REGISTER_FIELDS: [Field; 6] = [OPCODE, RS, RT, RD, SHAMT, FUNCT];
/// Fields of the immediate-type layout, in bit order from MSB.
pub const IMMEDIATE_FIELDS: [Field; 4] = [OPCODE, RS, RT, IMM];
/// Fields of the jump-type layout, in bit order from MSB.
pub const JUMP_FIELDS: [Field; 2] = [OPCODE, ADDR];

/// Encoding family selected by the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Register,
    Immediate,
    Jump,
}

impl Format {
    /// Field layout of this family.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Format::Register => &REGISTER_FIELDS,
            Format::Immediate => &IMMEDIATE_FIELDS,
            Format::Jump => &JUMP_FIELDS,
        }
    }
}

/// Primary operation selector, bits 31-26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Special = 0x00,
    J = 0x02,
    Jal = 0x03,
    Beq = 0x04,
    Bne = 0x05,
    Blez = 0x06,
    Bgtz = 0x07,
    Addi = 0x08,
    Addiu = 0x09,
    Slti = 0x0A,
    Sltiu = 0x0B,
    Andi = 0x0C,
    Ori = 0x0D,
    Xori = 0x0E,
    Llo = 0x18,
    Lhi = 0x19,
    Trap = 0x1A,
    Lb = 0x20,
    Lh = 0x21,
    Lw = 0x23,
    Lbu = 0x24,
    Lhu = 0x25,
    Sb = 0x28,
    Sh = 0x29,
    Sw = 0x2B,
}

/// Register-type opcodes.
pub const REG_OPCODE: &[Opcode] = &[Opcode::Special];

/// Immediate-type opcodes.
pub const IMM_OPCODE: &[Opcode] = &[
    Opcode::Beq,
    Opcode::Bne,
    Opcode::Blez,
    Opcode::Bgtz,
    Opcode::Addi,
    Opcode::Addiu,
    Opcode::Slti,
    Opcode::Sltiu,
    Opcode::Andi,
    Opcode::Ori,
    Opcode::Xori,
    Opcode::Llo,
    Opcode::Lhi,
    Opcode::Lb,
    Opcode::Lh,
    Opcode::Lw,
    Opcode::Lbu,
    Opcode::Lhu,
    Opcode::Sb,
    Opcode::Sh,
    Opcode::Sw,
];

/// Jump-type opcodes. TRAP carries its 26-bit literal in the jump layout.
pub const JMP_OPCODE: &[Opcode] = &[Opcode::J, Opcode::Jal, Opcode::Trap];

impl Opcode {
    /// Every defined opcode, in numeric order.
    pub const ALL: [Opcode; 25] = [
        Opcode::Special,
        Opcode::J,
        Opcode::Jal,
        Opcode::Beq,
        Opcode::Bne,
        Opcode::Blez,
        Opcode::Bgtz,
        Opcode::Addi,
        Opcode::Addiu,
        Opcode::Slti,
        Opcode::Sltiu,
        Opcode::Andi,
        Opcode::Ori,
        Opcode::Xori,
        Opcode::Llo,
        Opcode::Lhi,
        Opcode::Trap,
        Opcode::Lb,
        Opcode::Lh,
        Opcode::Lw,
        Opcode::Lbu,
        Opcode::Lhu,
        Opcode::Sb,
        Opcode::Sh,
        Opcode::Sw,
    ];

    /// Look up an opcode by its 6-bit code.
    pub fn from_bits(bits: u8) -> Option<Opcode> {
        let op = match bits {
            0x00 => Opcode::Special,
            0x02 => Opcode::J,
            0x03 => Opcode::Jal,
            0x04 => Opcode::Beq,
            0x05 => Opcode::Bne,
            0x06 => Opcode::Blez,
            0x07 => Opcode::Bgtz,
            0x08 => Opcode::Addi,
            0x09 => Opcode::Addiu,
            0x0A => Opcode::Slti,
            0x0B => Opcode::Sltiu,
            0x0C => Opcode::Andi,
            0x0D => Opcode::Ori,
            0x0E => Opcode::Xori,
            0x18 => Opcode::Llo,
            0x19 => Opcode::Lhi,
            0x1A => Opcode::Trap,
            0x20 => Opcode::Lb,
            0x21 => Opcode::Lh,
            0x23 => Opcode::Lw,
            0x24 => Opcode::Lbu,
            0x25 => Opcode::Lhu,
            0x28 => Opcode::Sb,
            0x29 => Opcode::Sh,
            0x2B => Opcode::Sw,
            _ => return None,
        };
        Some(op)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Encoding family of this opcode.
    pub fn format(self) -> Format {
        match self {
            Opcode::Special => Format::Register,
            Opcode::J | Opcode::Jal | Opcode::Trap => Format::Jump,
            Opcode::Beq
            | Opcode::Bne
            | Opcode::Blez
            | Opcode::Bgtz
            | Opcode::Addi
            | Opcode::Addiu
            | Opcode::Slti
            | Opcode::Sltiu
            | Opcode::Andi
            | Opcode::Ori
            | Opcode::Xori
            | Opcode::Llo
            | Opcode::Lhi
            | Opcode::Lb
            | Opcode::Lh
            | Opcode::Lw
            | Opcode::Lbu
            | Opcode::Lhu
            | Opcode::Sb
            | Opcode::Sh
            | Opcode::Sw => Format::Immediate,
        }
    }

    /// Whether the 16-bit immediate is sign-extended when used as an operand.
    ///
    /// Logical immediates and the half-word loads (LLO/LHI) zero-extend.
    pub fn sign_extends_imm(self) -> bool {
        !matches!(
            self,
            Opcode::Andi | Opcode::Ori | Opcode::Xori | Opcode::Llo | Opcode::Lhi
        )
    }

    /// Extend a raw 16-bit immediate to an operand for this opcode.
    #[inline]
    pub fn extend_imm(self, imm: u16) -> u32 {
        if self.sign_extends_imm() {
            imm as i16 as i32 as u32
        } else {
            u32::from(imm)
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Special => "special",
            Opcode::J => "j",
            Opcode::Jal => "jal",
            Opcode::Beq => "beq",
            Opcode::Bne => "bne",
            Opcode::Blez => "blez",
            Opcode::Bgtz => "bgtz",
            Opcode::Addi => "addi",
            Opcode::Addiu => "addiu",
            Opcode::Slti => "slti",
            Opcode::Sltiu => "sltiu",
            Opcode::Andi => "andi",
            Opcode::Ori => "ori",
            Opcode::Xori => "xori",
            Opcode::Llo => "llo",
            Opcode::Lhi => "lhi",
            Opcode::Trap => "trap",
            Opcode::Lb => "lb",
            Opcode::Lh => "lh",
            Opcode::Lw => "lw",
            Opcode::Lbu => "lbu",
            Opcode::Lhu => "lhu",
            Opcode::Sb => "sb",
            Opcode::Sh => "sh",
            Opcode::Sw => "sw",
        }
    }
}

/// Classify raw opcode bits. `None` means the opcode is unclassified.
#[inline]
pub fn classify(opcode_bits: u8) -> Option<Format> {
    Opcode::from_bits(opcode_bits).map(Opcode::format)
}

/// Secondary operation selector for SPECIAL instructions, bits 5-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Funct {
    Sll = 0x00,
    Srl = 0x02,
    Sra = 0x03,
    Sllv = 0x04,
    Srlv = 0x06,
    Srav = 0x07,
    Jr = 0x08,
    Jalr = 0x09,
    Mfhi = 0x10,
    Mthi = 0x11,
    Mflo = 0x12,
    Mtlo = 0x13,
    Add = 0x20,
    Addu = 0x21,
    Sub = 0x22,
    Subu = 0x23,
    And = 0x24,
    Or = 0x25,
    Xor = 0x26,
    Nor = 0x27,
    Slt = 0x2A,
    Sltu = 0x2B,
}

impl Funct {
    /// Every defined funct, in numeric order.
    pub const ALL: [Funct; 22] = [
        Funct::Sll,
        Funct::Srl,
        Funct::Sra,
        Funct::Sllv,
        Funct::Srlv,
        Funct::Srav,
        Funct::Jr,
        Funct::Jalr,
        Funct::Mfhi,
        Funct::Mthi,
        Funct::Mflo,
        Funct::Mtlo,
        Funct::Add,
        Funct::Addu,
        Funct::Sub,
        Funct::Subu,
        Funct::And,
        Funct::Or,
        Funct::Xor,
        Funct::Nor,
        Funct::Slt,
        Funct::Sltu,
    ];

    /// Look up a funct by its 6-bit code.
    pub fn from_bits(bits: u8) -> Option<Funct> {
        Funct::ALL.iter().copied().find(|f| f.bits() == bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the instruction shifts by the `shamt` field.
    pub fn uses_shamt(self) -> bool {
        matches!(self, Funct::Sll | Funct::Srl | Funct::Sra)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Funct::Sll => "sll",
            Funct::Srl => "srl",
            Funct::Sra => "sra",
            Funct::Sllv => "sllv",
            Funct::Srlv => "srlv",
            Funct::Srav => "srav",
            Funct::Jr => "jr",
            Funct::Jalr => "jalr",
            Funct::Mfhi => "mfhi",
            Funct::Mthi => "mthi",
            Funct::Mflo => "mflo",
            Funct::Mtlo => "mtlo",
            Funct::Add => "add",
            Funct::Addu => "addu",
            Funct::Sub => "sub",
            Funct::Subu => "subu",
            Funct::And => "and",
            Funct::Or => "or",
            Funct::Xor => "xor",
            Funct::Nor => "nor",
            Funct::Slt => "slt",
            Funct::Sltu => "sltu",
        }
    }
}

/// A 5-bit logical register index (0-31). Register 0 always reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Reg(u8);

impl Reg {
    pub const ZERO: Reg = Reg(0);
    pub const COUNT: usize = 32;

    /// Build a register index, rejecting values that do not fit in 5 bits.
    pub fn new(index: u8) -> Result<Reg, IsaError> {
        if usize::from(index) < Self::COUNT {
            Ok(Reg(index))
        } else {
            Err(IsaError::InvalidRegister { index })
        }
    }

    /// Build a register index from a raw field, keeping only the low 5 bits.
    #[inline]
    pub const fn from_field(bits: u32) -> Reg {
        Reg((bits & 0x1F) as u8)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// All 32 register indices in order.
    pub fn all() -> impl Iterator<Item = Reg> {
        (0..Self::COUNT as u8).map(Reg)
    }
}

impl TryFrom<u8> for Reg {
    type Error = IsaError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Reg::new(index)
    }
}

impl From<Reg> for u8 {
    fn from(reg: Reg) -> u8 {
        reg.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
