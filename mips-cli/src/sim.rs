//! Step Harness
//!
//! Drives the datapath one instruction per step:
//! 1. decode the word
//! 2. read `rs`/`rt` (state as of the start of the step)
//! 3. pick the ALU operation and operand B (`rt` value or extended immediate)
//! 4. evaluate, then stage write-back to `rd` (register-type) or `rt` (immediate-type)
//! 5. commit at the step boundary
//!
//! An overflowing ADD/SUB/ADDI suppresses its write-back and marks the step as
//! trapped. There is no program counter: words run in order, and branches,
//! jumps, loads/stores, TRAP and HI/LO moves are recorded as skipped.

use mips_core::cpu::alu::{self, AluOp};
use mips_core::cpu::decoder::{decode, Instruction, InstructionRecord};
use mips_core::cpu::isa::{Format, Opcode, Reg};
use mips_core::cpu::register_file::{PendingWrite, RegisterFile};
use serde::Serialize;

/// A register write committed at the end of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteTrace {
    pub reg: u8,
    pub value: u32,
}

impl From<PendingWrite> for WriteTrace {
    fn from(write: PendingWrite) -> Self {
        Self {
            reg: write.reg.index(),
            value: write.value,
        }
    }
}

/// Everything observed during one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    pub step: u64,
    pub word: u32,
    pub disasm: String,
    pub record: InstructionRecord,
    pub rs_value: u32,
    pub rt_value: u32,
    pub alu_op: Option<AluOp>,
    pub operand_b: Option<u32>,
    pub result: Option<u32>,
    pub overflow: bool,
    pub trapped: bool,
    pub skipped: bool,
    pub write: Option<WriteTrace>,
}

/// Result of a whole run: per-step traces plus the final register state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub steps: Vec<StepTrace>,
    pub registers: [u32; Reg::COUNT],
    pub traps: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Datapath {
    regs: RegisterFile,
    step: u64,
}

impl Datapath {
    pub fn new(regs: RegisterFile) -> Self {
        Self { regs, step: 0 }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Number of steps executed so far.
    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Execute one instruction word and commit its write-back.
    pub fn step(&mut self, word: u32) -> StepTrace {
        let inst = decode(word);
        let (rs_value, rt_value) = self.regs.read(inst.rs(), inst.rt());

        let mut trace = StepTrace {
            step: self.step,
            word,
            disasm: inst.to_string(),
            record: inst.record(),
            rs_value,
            rt_value,
            alu_op: None,
            operand_b: None,
            result: None,
            overflow: false,
            trapped: false,
            skipped: false,
            write: None,
        };

        match AluOp::for_instruction(&inst) {
            Some(op) => self.execute_alu(&inst, op, rs_value, rt_value, &mut trace),
            None => self.execute_other(&inst, rt_value, &mut trace),
        }

        trace.write = self.regs.commit().map(WriteTrace::from);
        self.step += 1;
        trace
    }

    fn execute_alu(&mut self, inst: &Instruction, op: AluOp, rs_value: u32, rt_value: u32, trace: &mut StepTrace) {
        let (operand_b, dest) = match inst.format() {
            Some(Format::Immediate) => (inst.imm_operand(), inst.rt()),
            _ => (rt_value, inst.rd()),
        };
        let out = alu::execute(op, rs_value, operand_b, inst.shamt());

        trace.alu_op = Some(op);
        trace.operand_b = Some(operand_b);
        trace.result = Some(out.result);
        trace.overflow = out.overflow;

        if out.overflow && op.traps() {
            log::warn!(
                "Step {}: overflow trap on `{}` (0x{:08X} {:?} 0x{:08X}), write-back suppressed",
                self.step,
                inst,
                rs_value,
                op,
                operand_b
            );
            trace.trapped = true;
        } else {
            self.regs.write(dest, out.result);
        }
    }

    fn execute_other(&mut self, inst: &Instruction, rt_value: u32, trace: &mut StepTrace) {
        let imm = u32::from(inst.imm());
        match inst.opcode() {
            Some(Opcode::Llo) => self.regs.write(inst.rt(), (rt_value & 0xFFFF_0000) | imm),
            Some(Opcode::Lhi) => self.regs.write(inst.rt(), (imm << 16) | (rt_value & 0x0000_FFFF)),
            _ => {
                log::debug!("Step {}: `{}` is outside the datapath, skipped", self.step, inst);
                trace.skipped = true;
            }
        }
    }

    /// Run a program, stopping after `max_steps` if given.
    pub fn run(&mut self, program: &[u32], max_steps: Option<usize>) -> SimReport {
        let limit = max_steps.unwrap_or(program.len()).min(program.len());
        let steps: Vec<StepTrace> = program[..limit].iter().map(|&word| self.step(word)).collect();
        let traps = steps.iter().filter(|s| s.trapped).count();

        log::info!(
            "Simulated {} steps ({} trapped, {} skipped)",
            steps.len(),
            traps,
            steps.iter().filter(|s| s.skipped).count()
        );

        SimReport {
            steps,
            registers: self.regs.snapshot(),
            traps,
        }
    }
}
