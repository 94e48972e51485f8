//! Register File
//!
//! 32 logical registers backed by 31 physical slots. Logical register 0 has no
//! storage and always reads as zero; writes to it are discarded.
//!
//! # Ports
//! - two independent read ports (`rs`, `rt`)
//! - one synchronous write port
//!
//! # Step Ordering
//! A write is staged, not applied. Reads during the step keep observing the
//! state from the start of the step. [`RegisterFile::commit`] applies the
//! staged write at the step boundary, so it becomes visible from the next step.

use crate::cpu::isa::Reg;

/// Number of physical storage slots (logical registers 1-31).
pub const SLOTS: usize = Reg::COUNT - 1;

/// A write staged on the write port, waiting for the step boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWrite {
    pub reg: Reg,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    /// Logical register `n` lives in `slots[n - 1]`.
    slots: [u32; SLOTS],
    pending: Option<PendingWrite>,
}

impl RegisterFile {
    /// Create a register file with every register zeroed.
    pub fn new() -> Self {
        Self::with_values([0; SLOTS])
    }

    /// Create a register file pre-seeded with the values of registers 1-31.
    pub fn with_values(values: [u32; SLOTS]) -> Self {
        Self {
            slots: values,
            pending: None,
        }
    }

    /// Read both ports. Staged writes are not visible.
    #[inline]
    pub fn read(&self, rs: Reg, rt: Reg) -> (u32, u32) {
        (self.read_one(rs), self.read_one(rt))
    }

    /// Read a single register.
    #[inline]
    pub fn read_one(&self, reg: Reg) -> u32 {
        if reg.is_zero() {
            0
        } else {
            self.slots[usize::from(reg.index()) - 1]
        }
    }

    /// Stage a write for the next step boundary.
    ///
    /// With a single write port, a second write in the same step replaces the
    /// first. Writes to register 0 are discarded before they reach the port,
    /// so they never replace an earlier staged write.
    pub fn write(&mut self, reg: Reg, value: u32) {
        if reg.is_zero() {
            log::trace!("Discarding write of 0x{:08X} to $0", value);
            return;
        }
        if let Some(prev) = self.pending.replace(PendingWrite { reg, value }) {
            log::debug!(
                "Staged write {} = 0x{:08X} replaced by {} = 0x{:08X}",
                prev.reg,
                prev.value,
                reg,
                value
            );
        }
    }

    /// Apply the staged write, if any, and return it.
    pub fn commit(&mut self) -> Option<PendingWrite> {
        let write = self.pending.take()?;
        self.slots[usize::from(write.reg.index()) - 1] = write.value;
        Some(write)
    }

    /// The write waiting for the next commit.
    #[inline]
    pub fn pending(&self) -> Option<PendingWrite> {
        self.pending
    }

    /// Committed values of all 32 logical registers; index 0 is always zero.
    pub fn snapshot(&self) -> [u32; Reg::COUNT] {
        let mut regs = [0u32; Reg::COUNT];
        regs[1..].copy_from_slice(&self.slots);
        regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
