/*!
dispatch.rs - The fetch-decode-execute loop: `step` executes exactly one
instruction and returns its cost, or an `IllegalOpcode` if the fetched byte
isn't one of the 151 documented opcodes.

Orchestration
=============
1. Fetch the opcode byte at PC (advancing PC by 1).
2. Decode it via `cpu::decode::decode` — `Mnemonic::Illegal` aborts here,
   before any further state mutation, per spec.md §4.7's fail-safe
   contract.
3. Resolve the addressing mode (advancing PC by the operand width),
   producing either a value (Immediate) or an effective address.
4. Execute the opcode's kernel from `cpu::ops::*`.
5. Return the total cycle cost: base cycles from the decode table, plus a
   page-cross penalty for indexed reads that cross a boundary, plus the
   branch-specific 0/1/2 extra cycles for conditional branches.

This module also exposes `irq`/`nmi`: the hardware interrupt entry
sequences a collaborator may invoke between `step()` calls (never from
inside `step` itself — spec.md §5 confines suspension/cancellation points
to between-instruction boundaries).
*/

use crate::cpu::addressing::{
    AddrMode, addr_abs, addr_abs_x, addr_abs_x_pc, addr_abs_y, addr_abs_y_pc, addr_ind_x,
    addr_ind_y, addr_ind_y_pc, addr_zp, addr_zp_x, addr_zp_y, fetch_byte, read_word_indirect_bug,
};
use crate::cpu::decode::{Mnemonic, decode};
use crate::cpu::ops::{
    arithmetic, branch, compare, control_flow, flags, incdec, load_store, logical, misc, shift,
    stack, transfer,
};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO};
use crate::error::IllegalOpcode;
use crate::memory::Memory;

/// What `step` actually did, for callers that want more than "cycles
/// consumed" (disassembly, tracing, testable-property assertions).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepInfo {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub pc_before: u16,
    pub cycles: u32,
}

/// Execute exactly one instruction. `pc` must point at an opcode byte.
pub(crate) fn step<C: CpuRegs>(cpu: &mut C, mem: &mut impl Memory) -> Result<StepInfo, IllegalOpcode> {
    let pc_before = cpu.pc();
    let opcode = fetch_byte(cpu, mem);
    let info = *decode(opcode);

    if info.mnemonic == Mnemonic::Illegal {
        // No state mutation beyond the opcode fetch itself.
        return Err(IllegalOpcode { pc: pc_before, byte: opcode });
    }

    let mut cycles = info.base_cycles;

    use AddrMode::*;
    use Mnemonic::*;

    match info.mnemonic {
        // ---------------- Loads ----------------
        Lda | Ldx | Ldy => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            match info.mnemonic {
                Lda => load_store::lda(cpu, v),
                Ldx => load_store::ldx(cpu, v),
                Ldy => load_store::ldy(cpu, v),
                _ => unreachable!(),
            }
        }

        // ---------------- Stores ----------------
        Sta | Stx | Sty => {
            let addr = resolve_address(cpu, mem, info.mode);
            let v = match info.mnemonic {
                Sta => cpu.a(),
                Stx => cpu.x(),
                Sty => cpu.y(),
                _ => unreachable!(),
            };
            mem.write(addr, v);
        }

        // ---------------- Transfers ----------------
        Tax => transfer::tax(cpu),
        Tay => transfer::tay(cpu),
        Txa => transfer::txa(cpu),
        Tya => transfer::tya(cpu),
        Tsx => transfer::tsx(cpu),
        Txs => transfer::txs(cpu),

        // ---------------- Stack ----------------
        Pha => stack::pha(cpu, mem),
        Php => stack::php(cpu, mem),
        Pla => stack::pla(cpu, mem),
        Plp => stack::plp(cpu, mem),

        // ---------------- Arithmetic ----------------
        Adc => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            arithmetic::adc(cpu, v);
        }
        Sbc => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            arithmetic::sbc(cpu, v);
        }

        // ---------------- Logical ----------------
        And => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            logical::and(cpu, v);
        }
        Ora => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            logical::ora(cpu, v);
        }
        Eor => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            logical::eor(cpu, v);
        }
        Bit => {
            let addr = resolve_address(cpu, mem, info.mode);
            let v = mem.read(addr);
            logical::bit(cpu, v);
        }

        // ---------------- Shifts / rotates ----------------
        Asl | Lsr | Rol | Ror => {
            if info.mode == Accumulator {
                match info.mnemonic {
                    Asl => shift::asl_acc(cpu),
                    Lsr => shift::lsr_acc(cpu),
                    Rol => shift::rol_acc(cpu),
                    Ror => shift::ror_acc(cpu),
                    _ => unreachable!(),
                }
            } else {
                let addr = resolve_address(cpu, mem, info.mode);
                match info.mnemonic {
                    Asl => shift::asl_mem(cpu, mem, addr),
                    Lsr => shift::lsr_mem(cpu, mem, addr),
                    Rol => shift::rol_mem(cpu, mem, addr),
                    Ror => shift::ror_mem(cpu, mem, addr),
                    _ => unreachable!(),
                }
            }
        }

        // ---------------- Increments / decrements ----------------
        Inc => {
            let addr = resolve_address(cpu, mem, info.mode);
            incdec::inc_mem(cpu, mem, addr);
        }
        Dec => {
            let addr = resolve_address(cpu, mem, info.mode);
            incdec::dec_mem(cpu, mem, addr);
        }
        Inx => incdec::inx(cpu),
        Dex => incdec::dex(cpu),
        Iny => incdec::iny(cpu),
        Dey => incdec::dey(cpu),

        // ---------------- Compare ----------------
        Cmp => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            compare::compare(cpu, cpu.a(), v);
        }
        Cpx => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            compare::compare(cpu, cpu.x(), v);
        }
        Cpy => {
            let v = read_operand(cpu, mem, info.mode, &mut cycles);
            compare::compare(cpu, cpu.y(), v);
        }

        // ---------------- Branches ----------------
        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => {
            let take = match info.mnemonic {
                Bcc => !cpu.is_flag_set(CARRY),
                Bcs => cpu.is_flag_set(CARRY),
                Beq => cpu.is_flag_set(ZERO),
                Bne => !cpu.is_flag_set(ZERO),
                Bmi => cpu.is_flag_set(NEGATIVE),
                Bpl => !cpu.is_flag_set(NEGATIVE),
                Bvc => !cpu.is_flag_set(OVERFLOW),
                Bvs => cpu.is_flag_set(OVERFLOW),
                _ => unreachable!(),
            };
            cycles += branch::branch(cpu, mem, take);
        }

        // ---------------- Jumps / subroutines ----------------
        Jmp => {
            let target = match info.mode {
                Absolute => addr_abs(cpu, mem),
                Indirect => {
                    let ptr = addr_abs(cpu, mem);
                    read_word_indirect_bug(mem, ptr)
                }
                _ => unreachable!(),
            };
            control_flow::jmp(cpu, target);
        }
        Jsr => {
            let target = addr_abs(cpu, mem);
            control_flow::jsr(cpu, mem, target);
        }
        Rts => control_flow::rts(cpu, mem),
        Rti => control_flow::rti(cpu, mem),
        Brk => control_flow::brk(cpu, mem),

        // ---------------- Flag set/clear ----------------
        Clc => flags::clc(cpu),
        Sec => flags::sec(cpu),
        Cli => flags::cli(cpu),
        Sei => flags::sei(cpu),
        Cld => flags::cld(cpu),
        Sed => flags::sed(cpu),
        Clv => flags::clv(cpu),

        Nop => misc::nop(),

        Illegal => unreachable!("handled above"),
    }

    Ok(StepInfo { opcode, mnemonic: info.mnemonic, mode: info.mode, pc_before, cycles })
}

/// Resolve an addressing mode to a memory address. Not valid for
/// `Implied`/`Accumulator`/`Immediate`/`Relative`.
fn resolve_address<C: CpuRegs>(cpu: &mut C, mem: &impl Memory, mode: AddrMode) -> u16 {
    use AddrMode::*;
    match mode {
        ZeroPage => addr_zp(cpu, mem),
        ZeroPageX => addr_zp_x(cpu, mem),
        ZeroPageY => addr_zp_y(cpu, mem),
        Absolute => addr_abs(cpu, mem),
        AbsoluteX => addr_abs_x(cpu, mem),
        AbsoluteY => addr_abs_y(cpu, mem),
        IndexedIndirect => addr_ind_x(cpu, mem),
        IndirectIndexed => addr_ind_y(cpu, mem),
        other => panic!("resolve_address called with non-memory mode {other:?}"),
    }
}

/// Resolve an addressing mode to its operand byte, applying the page-cross
/// penalty to `*cycles` for the indexed read modes that incur one.
fn read_operand<C: CpuRegs>(cpu: &mut C, mem: &impl Memory, mode: AddrMode, cycles: &mut u32) -> u8 {
    use AddrMode::*;
    match mode {
        Immediate => fetch_byte(cpu, mem),
        ZeroPage => {
            let addr = addr_zp(cpu, mem);
            mem.read(addr)
        }
        ZeroPageX => {
            let addr = addr_zp_x(cpu, mem);
            mem.read(addr)
        }
        Absolute => {
            let addr = addr_abs(cpu, mem);
            mem.read(addr)
        }
        AbsoluteX => {
            let (addr, crossed) = addr_abs_x_pc(cpu, mem);
            if crossed {
                *cycles += 1;
            }
            mem.read(addr)
        }
        AbsoluteY => {
            let (addr, crossed) = addr_abs_y_pc(cpu, mem);
            if crossed {
                *cycles += 1;
            }
            mem.read(addr)
        }
        IndexedIndirect => {
            let addr = addr_ind_x(cpu, mem);
            mem.read(addr)
        }
        IndirectIndexed => {
            let (addr, crossed) = addr_ind_y_pc(cpu, mem);
            if crossed {
                *cycles += 1;
            }
            mem.read(addr)
        }
        other => panic!("read_operand called with non-readable mode {other:?}"),
    }
}

/// Hardware interrupt entry: push PC then status (BREAK forced to 0), set
/// `I`, load PC from `vector`. Used by both `irq` and `nmi`; not reachable
/// from `step` itself.
pub(crate) fn service_interrupt<C: CpuRegs>(cpu: &mut C, mem: &mut impl Memory, vector: u16) {
    let pc = cpu.pc();
    stack::push_word(cpu, mem, pc);
    stack::push_status_with_break(cpu, mem, false);
    cpu.assign_flag(IRQ_DISABLE, true);
    cpu.set_pc(mem.read_u16(vector));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::CpuState;
    use crate::memory::FlatMemory;

    fn setup(prg: &[u8]) -> (CpuState, FlatMemory) {
        let mut mem = FlatMemory::new();
        mem.load(0x1000, prg);
        let mut cpu = CpuState::new();
        cpu.set_pc(0x1000);
        (cpu, mem)
    }

    #[test]
    fn immediate_adc_scenario() {
        let (mut cpu, mut mem) = setup(&[0xA9, 0x10, 0x69, 0x20, 0x00]);
        step(&mut cpu, &mut mem).unwrap();
        step(&mut cpu, &mut mem).unwrap();
        assert_eq!(cpu.a(), 0x30);
        assert!(!cpu.is_flag_set(CARRY));
        assert!(!cpu.is_flag_set(ZERO));
        assert!(!cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(OVERFLOW));
        assert_eq!(cpu.pc(), 0x1004);
    }

    #[test]
    fn illegal_opcode_does_not_mutate_state_beyond_fetch() {
        let (mut cpu, mut mem) = setup(&[0x02]); // undocumented
        let pc_before = cpu.pc();
        let a_before = cpu.a();
        let err = step(&mut cpu, &mut mem).unwrap_err();
        assert_eq!(err, IllegalOpcode { pc: pc_before, byte: 0x02 });
        assert_eq!(cpu.a(), a_before);
        assert_eq!(cpu.pc(), pc_before.wrapping_add(1));
    }

    #[test]
    fn asl_accumulator_carry_out() {
        let (mut cpu, mut mem) = setup(&[0xA9, 0x81, 0x0A]);
        step(&mut cpu, &mut mem).unwrap();
        step(&mut cpu, &mut mem).unwrap();
        assert_eq!(cpu.a(), 0x02);
        assert!(cpu.is_flag_set(CARRY));
        assert!(!cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(ZERO));
    }

    #[test]
    fn indirect_jmp_page_wrap_bug() {
        let (mut cpu, mut mem) = setup(&[0x6C, 0xFF, 0x30]);
        mem.write(0x30FF, 0x40);
        mem.write(0x3000, 0x50);
        mem.write(0x3100, 0xFF); // must NOT be read
        let info = step(&mut cpu, &mut mem).unwrap();
        assert_eq!(cpu.pc(), 0x5040);
        assert_eq!(info.mnemonic, Mnemonic::Jmp);
    }
}
