//! Disassembly
//!
//! Renders decoded instructions as assembly text, e.g. `add $3, $1, $2`.
//! Words with an unknown opcode or funct render as `.word 0x........`.

use std::fmt;

use crate::cpu::decoder::{Fields, Instruction};
use crate::cpu::isa::{Funct, Opcode};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.opcode(), self.fields) {
            (Some(Opcode::Special), Fields::Register { rs, rt, rd, shamt, funct }) => {
                let Some(funct) = Funct::from_bits(funct) else {
                    return raw_word(self, f);
                };
                let name = funct.mnemonic();
                match funct {
                    Funct::Sll | Funct::Srl | Funct::Sra => write!(f, "{} {}, {}, {}", name, rd, rs, shamt),
                    Funct::Jr | Funct::Mthi | Funct::Mtlo => write!(f, "{} {}", name, rs),
                    Funct::Mfhi | Funct::Mflo => write!(f, "{} {}", name, rd),
                    Funct::Jalr => write!(f, "{} {}, {}", name, rd, rs),
                    _ => write!(f, "{} {}, {}, {}", name, rd, rs, rt),
                }
            }
            (Some(op), Fields::Immediate { rs, rt, imm }) => {
                let name = op.mnemonic();
                match op {
                    Opcode::Andi | Opcode::Ori | Opcode::Xori => {
                        write!(f, "{} {}, {}, 0x{:x}", name, rt, rs, imm)
                    }
                    Opcode::Llo | Opcode::Lhi => write!(f, "{} {}, 0x{:x}", name, rt, imm),
                    Opcode::Beq | Opcode::Bne => write!(f, "{} {}, {}, {}", name, rs, rt, imm as i16),
                    Opcode::Blez | Opcode::Bgtz => write!(f, "{} {}, {}", name, rs, imm as i16),
                    Opcode::Lb
                    | Opcode::Lh
                    | Opcode::Lw
                    | Opcode::Lbu
                    | Opcode::Lhu
                    | Opcode::Sb
                    | Opcode::Sh
                    | Opcode::Sw => write!(f, "{} {}, {}({})", name, rt, imm as i16, rs),
                    _ => write!(f, "{} {}, {}, {}", name, rt, rs, imm as i16),
                }
            }
            (Some(op), Fields::Jump { addr }) => write!(f, "{} 0x{:x}", op.mnemonic(), addr),
            _ => raw_word(self, f),
        }
    }
}

fn raw_word(inst: &Instruction, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match inst.encode() {
        Ok(word) => write!(f, ".word 0x{:08x}", word),
        Err(_) => write!(f, ".word ?"),
    }
}
