//! Datapath of a small MIPS-style core.
//!
//! - [`cpu::isa`]: instruction layout, opcode/funct tables, encoding families
//! - [`cpu::decoder`]: raw word to structured instruction
//! - [`cpu::encode`]: structured instruction back to raw word
//! - [`cpu::alu`]: arithmetic/logic with advisory overflow flag
//! - [`cpu::register_file`]: zero-hardwired register store with staged writes

pub mod cpu;
pub mod error;

pub use error::{CoreError, EncodeError, IsaError};
