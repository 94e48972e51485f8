//! Error Types
//!
//! Error types for the datapath library, built with `thiserror`.
//!
//! Decoding, ALU evaluation and register-file access are total and never fail.
//! Errors only arise at the edges where a caller hands raw numbers to the
//! library: building a register index or packing fields into an instruction word.

use thiserror::Error;

use crate::cpu::isa::Format;

/// Errors raised while constructing ISA values from raw numbers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsaError {
    /// Register index does not fit in the 5-bit register field.
    #[error("Invalid register {index} (must be 0-31)")]
    InvalidRegister { index: u8 },
}

/// Errors raised while packing fields into a 32-bit instruction word.
///
/// Out-of-range fields are rejected rather than masked, so a successful
/// encode always decodes back to the same fields.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A field value does not fit in its bit width.
    #[error("Field `{field}` value {value:#x} out of range (max {max:#x})")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// The opcode does not belong to the encoding family being packed.
    #[error("Opcode {opcode:#04x} is not a {expected:?}-type opcode")]
    WrongFormat { opcode: u8, expected: Format },

    /// Fields were omitted for an opcode that belongs to an encoding family.
    #[error("Opcode {opcode:#04x} is a {format:?}-type opcode but carries no fields")]
    MissingFields { opcode: u8, format: Format },
}

/// Top-level error for the library.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Isa(#[from] IsaError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<IsaError> for EncodeError {
    #[cold] // Error paths are cold
    fn from(err: IsaError) -> Self {
        match err {
            IsaError::InvalidRegister { index } => EncodeError::FieldOutOfRange {
                field: "register",
                value: u32::from(index),
                max: 31,
            },
        }
    }
}
