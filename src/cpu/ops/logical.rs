/*!
logical.rs - AND/ORA/EOR/BIT kernels.

AND/ORA/EOR fold the operand into A and update NZ from A. BIT is a
non-destructive probe: it tests `A & M` for Z, but takes N and V directly
from the operand's bits 7 and 6 — A is never written.
*/

use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{NEGATIVE, OVERFLOW, ZERO};

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() & v;
    cpu.set_a(r);
    cpu.update_zn(r);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() | v;
    cpu.set_a(r);
    cpu.update_zn(r);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() ^ v;
    cpu.set_a(r);
    cpu.update_zn(r);
}

#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    let temp = cpu.a() & v;
    cpu.assign_flag(ZERO, temp == 0);
    cpu.assign_flag(NEGATIVE, (v & 0x80) != 0);
    cpu.assign_flag(OVERFLOW, (v & 0x40) != 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::CpuState;

    #[test]
    fn and_clears_bits_and_updates_nz() {
        let mut cpu = CpuState::new();
        cpu.set_a(0xFF);
        and(&mut cpu, 0x0F);
        assert_eq!(cpu.a(), 0x0F);
        assert!(!cpu.is_flag_set(ZERO));
    }

    #[test]
    fn bit_does_not_modify_accumulator() {
        let mut cpu = CpuState::new();
        cpu.set_a(0x0F);
        bit(&mut cpu, 0xC0);
        assert_eq!(cpu.a(), 0x0F); // unchanged
        assert!(cpu.is_flag_set(ZERO)); // 0x0F & 0xC0 == 0
        assert!(cpu.is_flag_set(NEGATIVE)); // bit 7 of operand
        assert!(cpu.is_flag_set(OVERFLOW)); // bit 6 of operand
    }

    #[test]
    fn ora_eor_update_a_and_flags() {
        let mut cpu = CpuState::new();
        cpu.set_a(0x00);
        ora(&mut cpu, 0x80);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.is_flag_set(NEGATIVE));
        eor(&mut cpu, 0x80);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.is_flag_set(ZERO));
    }
}
