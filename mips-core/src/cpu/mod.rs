pub mod isa;
pub mod decoder;
pub mod encode;
pub mod alu;
pub mod register_file;
pub mod disasm;

pub use alu::{AluOp, AluOutput};
pub use decoder::{decode, Fields, Instruction, InstructionRecord};
pub use isa::{Format, Funct, Opcode, Reg};
pub use register_file::RegisterFile;
