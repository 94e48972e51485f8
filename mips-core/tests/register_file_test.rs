//! Tests for register file reads, writes and step-boundary commits

mod utils;

use mips_core::cpu::isa::Reg;
use mips_core::cpu::register_file::{PendingWrite, RegisterFile, SLOTS};
use utils::generate_random_words;

fn reg(index: u8) -> Reg {
    Reg::new(index).unwrap()
}

#[test]
fn test_register_file_simple() {
    let regs = RegisterFile::with_values([0xFFFF_FFFF; SLOTS]);
    assert_eq!(regs.read(reg(1), reg(0)), (0xFFFF_FFFF, 0));
}

#[test]
fn test_preload_maps_to_logical_index() {
    let mut values = [0u32; SLOTS];
    for (i, v) in values.iter_mut().enumerate() {
        *v = 0x100 + i as u32;
    }
    let regs = RegisterFile::with_values(values);
    for r in Reg::all().skip(1) {
        assert_eq!(regs.read_one(r), 0x100 + u32::from(r.index()) - 1);
    }
    let snapshot = regs.snapshot();
    assert_eq!(snapshot[0], 0);
    assert_eq!(snapshot[31], 0x100 + 30);
}

#[test]
fn test_register_zero_invariant() {
    let mut regs = RegisterFile::new();
    let values = generate_random_words(3, 256);
    for (i, value) in values.iter().enumerate() {
        let target = Reg::from_field(i as u32);
        regs.write(target, *value);
        assert_eq!(regs.read(Reg::ZERO, Reg::ZERO), (0, 0));
        regs.commit();
        assert_eq!(regs.read(Reg::ZERO, Reg::ZERO), (0, 0));
    }
}

#[test]
fn test_write_to_zero_is_discarded() {
    let mut regs = RegisterFile::new();
    regs.write(Reg::ZERO, 0xDEAD_BEEF);
    assert_eq!(regs.pending(), None);
    assert_eq!(regs.commit(), None);
    assert_eq!(regs.snapshot(), [0; 32]);
}

#[test]
fn test_write_to_zero_keeps_earlier_staged_write() {
    let mut regs = RegisterFile::new();
    regs.write(reg(5), 0x1234);
    regs.write(Reg::ZERO, 0xDEAD_BEEF);
    assert_eq!(regs.pending(), Some(PendingWrite { reg: reg(5), value: 0x1234 }));
    assert_eq!(regs.commit(), Some(PendingWrite { reg: reg(5), value: 0x1234 }));
    assert_eq!(regs.read_one(reg(5)), 0x1234);
}

#[test]
fn test_write_visible_only_after_commit() {
    let mut regs = RegisterFile::new();

    // step N
    regs.write(reg(5), 42);
    assert_eq!(regs.read(reg(5), reg(5)), (0, 0));
    assert_eq!(regs.commit(), Some(PendingWrite { reg: reg(5), value: 42 }));

    // step N + 1
    assert_eq!(regs.read(reg(5), reg(0)), (42, 0));
    assert_eq!(regs.pending(), None);
}

#[test]
fn test_second_write_in_step_replaces_first() {
    let mut regs = RegisterFile::new();
    regs.write(reg(1), 1);
    regs.write(reg(2), 2);
    assert_eq!(regs.commit(), Some(PendingWrite { reg: reg(2), value: 2 }));
    assert_eq!(regs.read(reg(1), reg(2)), (0, 2));
}

#[test]
fn test_commit_without_write_is_noop() {
    let mut regs = RegisterFile::with_values([7; SLOTS]);
    let before = regs.clone();
    assert_eq!(regs.commit(), None);
    assert_eq!(regs, before);
}

#[test]
fn test_every_register_writable() {
    let mut regs = RegisterFile::new();
    for r in Reg::all() {
        regs.write(r, u32::from(r.index()) * 3);
        regs.commit();
    }
    for r in Reg::all() {
        assert_eq!(regs.read_one(r), u32::from(r.index()) * 3);
    }
}
