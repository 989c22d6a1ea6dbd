/*!
decode.rs - Opcode decoder: maps each documented opcode byte to its
mnemonic, addressing mode, nominal cycle count, and the dynamic-timing
flags (`page_cross_penalty`, `rmw`, `branch`) `cpu::dispatch::step` needs.

Overview
========
A single 256-entry static table (`OPCODES`) is the sole source of decode
information. Entries for the 151 documented opcodes are populated; the
remaining 105 slots are `Mnemonic::Illegal`, so `decode` can report
"opcode not documented" without a second, parallel match statement.

This keeps the opcode set as a data table (a 256-entry Cartesian product of
~56 mnemonics x ~13 modes) rather than 151 duplicated `match` arms, per the
re-architecture the design notes call for.
*/

use crate::cpu::addressing::AddrMode;

/// One of the 56 documented 6502 mnemonics, plus `Illegal` for the 105
/// undocumented opcode bytes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    Pha,
    Php,
    Pla,
    Plp,
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Asl,
    Lsr,
    Rol,
    Ror,
    Inc,
    Dec,
    Inx,
    Dex,
    Iny,
    Dey,
    Cmp,
    Cpx,
    Cpy,
    Bcc,
    Bcs,
    Beq,
    Bne,
    Bmi,
    Bpl,
    Bvc,
    Bvs,
    Jmp,
    Jsr,
    Rts,
    Rti,
    Clc,
    Sec,
    Cli,
    Sei,
    Cld,
    Sed,
    Clv,
    Brk,
    Bit,
    Nop,
    Illegal,
}

/// Decode metadata for a single opcode byte.
#[derive(Copy, Clone, Debug)]
pub struct OpInfo {
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    /// Nominal cycle count, excluding dynamic penalties.
    pub base_cycles: u32,
    /// +1 cycle if the effective-address computation crosses a page
    /// boundary (indexed read modes and `(zp),Y`).
    pub page_cross_penalty: bool,
    /// True for the twelve read-modify-write memory opcodes
    /// (ASL/LSR/ROL/ROR/INC/DEC, non-accumulator forms).
    pub rmw: bool,
    /// True for the eight conditional relative branches.
    pub branch: bool,
}

impl OpInfo {
    const fn new(
        mnemonic: Mnemonic,
        mode: AddrMode,
        base_cycles: u32,
        page_cross_penalty: bool,
        rmw: bool,
        branch: bool,
    ) -> Self {
        Self {
            mnemonic,
            mode,
            base_cycles,
            page_cross_penalty,
            rmw,
            branch,
        }
    }

    const fn illegal() -> Self {
        Self::new(Mnemonic::Illegal, AddrMode::Implied, 0, false, false, false)
    }
}

/// Look up the decode metadata for a fetched opcode byte.
#[inline]
pub(crate) fn decode(opcode: u8) -> &'static OpInfo {
    &OPCODES[opcode as usize]
}

static OPCODES: [OpInfo; 256] = {
    use AddrMode::*;
    use Mnemonic::*;
    let mut t = [OpInfo::illegal(); 256];

    // --- Loads ---
    t[0xA9] = OpInfo::new(Lda, Immediate, 2, false, false, false);
    t[0xA5] = OpInfo::new(Lda, ZeroPage, 3, false, false, false);
    t[0xB5] = OpInfo::new(Lda, ZeroPageX, 4, false, false, false);
    t[0xAD] = OpInfo::new(Lda, Absolute, 4, false, false, false);
    t[0xBD] = OpInfo::new(Lda, AbsoluteX, 4, true, false, false);
    t[0xB9] = OpInfo::new(Lda, AbsoluteY, 4, true, false, false);
    t[0xA1] = OpInfo::new(Lda, IndexedIndirect, 6, false, false, false);
    t[0xB1] = OpInfo::new(Lda, IndirectIndexed, 5, true, false, false);

    t[0xA2] = OpInfo::new(Ldx, Immediate, 2, false, false, false);
    t[0xA6] = OpInfo::new(Ldx, ZeroPage, 3, false, false, false);
    t[0xB6] = OpInfo::new(Ldx, ZeroPageY, 4, false, false, false);
    t[0xAE] = OpInfo::new(Ldx, Absolute, 4, false, false, false);
    t[0xBE] = OpInfo::new(Ldx, AbsoluteY, 4, true, false, false);

    t[0xA0] = OpInfo::new(Ldy, Immediate, 2, false, false, false);
    t[0xA4] = OpInfo::new(Ldy, ZeroPage, 3, false, false, false);
    t[0xB4] = OpInfo::new(Ldy, ZeroPageX, 4, false, false, false);
    t[0xAC] = OpInfo::new(Ldy, Absolute, 4, false, false, false);
    t[0xBC] = OpInfo::new(Ldy, AbsoluteX, 4, true, false, false);

    // --- Stores ---
    t[0x85] = OpInfo::new(Sta, ZeroPage, 3, false, false, false);
    t[0x95] = OpInfo::new(Sta, ZeroPageX, 4, false, false, false);
    t[0x8D] = OpInfo::new(Sta, Absolute, 4, false, false, false);
    t[0x9D] = OpInfo::new(Sta, AbsoluteX, 5, false, false, false);
    t[0x99] = OpInfo::new(Sta, AbsoluteY, 5, false, false, false);
    t[0x81] = OpInfo::new(Sta, IndexedIndirect, 6, false, false, false);
    t[0x91] = OpInfo::new(Sta, IndirectIndexed, 6, false, false, false);

    t[0x86] = OpInfo::new(Stx, ZeroPage, 3, false, false, false);
    t[0x96] = OpInfo::new(Stx, ZeroPageY, 4, false, false, false);
    t[0x8E] = OpInfo::new(Stx, Absolute, 4, false, false, false);

    t[0x84] = OpInfo::new(Sty, ZeroPage, 3, false, false, false);
    t[0x94] = OpInfo::new(Sty, ZeroPageX, 4, false, false, false);
    t[0x8C] = OpInfo::new(Sty, Absolute, 4, false, false, false);

    // --- Transfers ---
    t[0xAA] = OpInfo::new(Tax, Implied, 2, false, false, false);
    t[0xA8] = OpInfo::new(Tay, Implied, 2, false, false, false);
    t[0x8A] = OpInfo::new(Txa, Implied, 2, false, false, false);
    t[0x98] = OpInfo::new(Tya, Implied, 2, false, false, false);
    t[0xBA] = OpInfo::new(Tsx, Implied, 2, false, false, false);
    t[0x9A] = OpInfo::new(Txs, Implied, 2, false, false, false);

    // --- Stack ---
    t[0x48] = OpInfo::new(Pha, Implied, 3, false, false, false);
    t[0x08] = OpInfo::new(Php, Implied, 3, false, false, false);
    t[0x68] = OpInfo::new(Pla, Implied, 4, false, false, false);
    t[0x28] = OpInfo::new(Plp, Implied, 4, false, false, false);

    // --- ADC / SBC ---
    t[0x69] = OpInfo::new(Adc, Immediate, 2, false, false, false);
    t[0x65] = OpInfo::new(Adc, ZeroPage, 3, false, false, false);
    t[0x75] = OpInfo::new(Adc, ZeroPageX, 4, false, false, false);
    t[0x6D] = OpInfo::new(Adc, Absolute, 4, false, false, false);
    t[0x7D] = OpInfo::new(Adc, AbsoluteX, 4, true, false, false);
    t[0x79] = OpInfo::new(Adc, AbsoluteY, 4, true, false, false);
    t[0x61] = OpInfo::new(Adc, IndexedIndirect, 6, false, false, false);
    t[0x71] = OpInfo::new(Adc, IndirectIndexed, 5, true, false, false);

    t[0xE9] = OpInfo::new(Sbc, Immediate, 2, false, false, false);
    t[0xE5] = OpInfo::new(Sbc, ZeroPage, 3, false, false, false);
    t[0xF5] = OpInfo::new(Sbc, ZeroPageX, 4, false, false, false);
    t[0xED] = OpInfo::new(Sbc, Absolute, 4, false, false, false);
    t[0xFD] = OpInfo::new(Sbc, AbsoluteX, 4, true, false, false);
    t[0xF9] = OpInfo::new(Sbc, AbsoluteY, 4, true, false, false);
    t[0xE1] = OpInfo::new(Sbc, IndexedIndirect, 6, false, false, false);
    t[0xF1] = OpInfo::new(Sbc, IndirectIndexed, 5, true, false, false);

    // --- Logical ---
    t[0x29] = OpInfo::new(And, Immediate, 2, false, false, false);
    t[0x25] = OpInfo::new(And, ZeroPage, 3, false, false, false);
    t[0x35] = OpInfo::new(And, ZeroPageX, 4, false, false, false);
    t[0x2D] = OpInfo::new(And, Absolute, 4, false, false, false);
    t[0x3D] = OpInfo::new(And, AbsoluteX, 4, true, false, false);
    t[0x39] = OpInfo::new(And, AbsoluteY, 4, true, false, false);
    t[0x21] = OpInfo::new(And, IndexedIndirect, 6, false, false, false);
    t[0x31] = OpInfo::new(And, IndirectIndexed, 5, true, false, false);

    t[0x09] = OpInfo::new(Ora, Immediate, 2, false, false, false);
    t[0x05] = OpInfo::new(Ora, ZeroPage, 3, false, false, false);
    t[0x15] = OpInfo::new(Ora, ZeroPageX, 4, false, false, false);
    t[0x0D] = OpInfo::new(Ora, Absolute, 4, false, false, false);
    t[0x1D] = OpInfo::new(Ora, AbsoluteX, 4, true, false, false);
    t[0x19] = OpInfo::new(Ora, AbsoluteY, 4, true, false, false);
    t[0x01] = OpInfo::new(Ora, IndexedIndirect, 6, false, false, false);
    t[0x11] = OpInfo::new(Ora, IndirectIndexed, 5, true, false, false);

    t[0x49] = OpInfo::new(Eor, Immediate, 2, false, false, false);
    t[0x45] = OpInfo::new(Eor, ZeroPage, 3, false, false, false);
    t[0x55] = OpInfo::new(Eor, ZeroPageX, 4, false, false, false);
    t[0x4D] = OpInfo::new(Eor, Absolute, 4, false, false, false);
    t[0x5D] = OpInfo::new(Eor, AbsoluteX, 4, true, false, false);
    t[0x59] = OpInfo::new(Eor, AbsoluteY, 4, true, false, false);
    t[0x41] = OpInfo::new(Eor, IndexedIndirect, 6, false, false, false);
    t[0x51] = OpInfo::new(Eor, IndirectIndexed, 5, true, false, false);

    // --- BIT ---
    t[0x24] = OpInfo::new(Bit, ZeroPage, 3, false, false, false);
    t[0x2C] = OpInfo::new(Bit, Absolute, 4, false, false, false);

    // --- Shifts / rotates ---
    t[0x0A] = OpInfo::new(Asl, Accumulator, 2, false, false, false);
    t[0x06] = OpInfo::new(Asl, ZeroPage, 5, false, true, false);
    t[0x16] = OpInfo::new(Asl, ZeroPageX, 6, false, true, false);
    t[0x0E] = OpInfo::new(Asl, Absolute, 6, false, true, false);
    t[0x1E] = OpInfo::new(Asl, AbsoluteX, 7, false, true, false);

    t[0x4A] = OpInfo::new(Lsr, Accumulator, 2, false, false, false);
    t[0x46] = OpInfo::new(Lsr, ZeroPage, 5, false, true, false);
    t[0x56] = OpInfo::new(Lsr, ZeroPageX, 6, false, true, false);
    t[0x4E] = OpInfo::new(Lsr, Absolute, 6, false, true, false);
    t[0x5E] = OpInfo::new(Lsr, AbsoluteX, 7, false, true, false);

    t[0x2A] = OpInfo::new(Rol, Accumulator, 2, false, false, false);
    t[0x26] = OpInfo::new(Rol, ZeroPage, 5, false, true, false);
    t[0x36] = OpInfo::new(Rol, ZeroPageX, 6, false, true, false);
    t[0x2E] = OpInfo::new(Rol, Absolute, 6, false, true, false);
    t[0x3E] = OpInfo::new(Rol, AbsoluteX, 7, false, true, false);

    t[0x6A] = OpInfo::new(Ror, Accumulator, 2, false, false, false);
    t[0x66] = OpInfo::new(Ror, ZeroPage, 5, false, true, false);
    t[0x76] = OpInfo::new(Ror, ZeroPageX, 6, false, true, false);
    t[0x6E] = OpInfo::new(Ror, Absolute, 6, false, true, false);
    t[0x7E] = OpInfo::new(Ror, AbsoluteX, 7, false, true, false);

    // --- Increments / decrements (memory) ---
    t[0xE6] = OpInfo::new(Inc, ZeroPage, 5, false, true, false);
    t[0xF6] = OpInfo::new(Inc, ZeroPageX, 6, false, true, false);
    t[0xEE] = OpInfo::new(Inc, Absolute, 6, false, true, false);
    t[0xFE] = OpInfo::new(Inc, AbsoluteX, 7, false, true, false);

    t[0xC6] = OpInfo::new(Dec, ZeroPage, 5, false, true, false);
    t[0xD6] = OpInfo::new(Dec, ZeroPageX, 6, false, true, false);
    t[0xCE] = OpInfo::new(Dec, Absolute, 6, false, true, false);
    t[0xDE] = OpInfo::new(Dec, AbsoluteX, 7, false, true, false);

    // --- Increments / decrements (register) ---
    t[0xE8] = OpInfo::new(Inx, Implied, 2, false, false, false);
    t[0xCA] = OpInfo::new(Dex, Implied, 2, false, false, false);
    t[0xC8] = OpInfo::new(Iny, Implied, 2, false, false, false);
    t[0x88] = OpInfo::new(Dey, Implied, 2, false, false, false);

    // --- Compare ---
    t[0xC9] = OpInfo::new(Cmp, Immediate, 2, false, false, false);
    t[0xC5] = OpInfo::new(Cmp, ZeroPage, 3, false, false, false);
    t[0xD5] = OpInfo::new(Cmp, ZeroPageX, 4, false, false, false);
    t[0xCD] = OpInfo::new(Cmp, Absolute, 4, false, false, false);
    t[0xDD] = OpInfo::new(Cmp, AbsoluteX, 4, true, false, false);
    t[0xD9] = OpInfo::new(Cmp, AbsoluteY, 4, true, false, false);
    t[0xC1] = OpInfo::new(Cmp, IndexedIndirect, 6, false, false, false);
    t[0xD1] = OpInfo::new(Cmp, IndirectIndexed, 5, true, false, false);

    t[0xE0] = OpInfo::new(Cpx, Immediate, 2, false, false, false);
    t[0xE4] = OpInfo::new(Cpx, ZeroPage, 3, false, false, false);
    t[0xEC] = OpInfo::new(Cpx, Absolute, 4, false, false, false);

    t[0xC0] = OpInfo::new(Cpy, Immediate, 2, false, false, false);
    t[0xC4] = OpInfo::new(Cpy, ZeroPage, 3, false, false, false);
    t[0xCC] = OpInfo::new(Cpy, Absolute, 4, false, false, false);

    // --- Branches ---
    t[0x10] = OpInfo::new(Bpl, Relative, 2, false, false, true);
    t[0x30] = OpInfo::new(Bmi, Relative, 2, false, false, true);
    t[0x50] = OpInfo::new(Bvc, Relative, 2, false, false, true);
    t[0x70] = OpInfo::new(Bvs, Relative, 2, false, false, true);
    t[0x90] = OpInfo::new(Bcc, Relative, 2, false, false, true);
    t[0xB0] = OpInfo::new(Bcs, Relative, 2, false, false, true);
    t[0xD0] = OpInfo::new(Bne, Relative, 2, false, false, true);
    t[0xF0] = OpInfo::new(Beq, Relative, 2, false, false, true);

    // --- Jumps / subroutines ---
    t[0x4C] = OpInfo::new(Jmp, Absolute, 3, false, false, false);
    t[0x6C] = OpInfo::new(Jmp, Indirect, 5, false, false, false);
    t[0x20] = OpInfo::new(Jsr, Absolute, 6, false, false, false);
    t[0x60] = OpInfo::new(Rts, Implied, 6, false, false, false);
    t[0x40] = OpInfo::new(Rti, Implied, 6, false, false, false);

    // --- Flags ---
    t[0x18] = OpInfo::new(Clc, Implied, 2, false, false, false);
    t[0x38] = OpInfo::new(Sec, Implied, 2, false, false, false);
    t[0x58] = OpInfo::new(Cli, Implied, 2, false, false, false);
    t[0x78] = OpInfo::new(Sei, Implied, 2, false, false, false);
    t[0xD8] = OpInfo::new(Cld, Implied, 2, false, false, false);
    t[0xF8] = OpInfo::new(Sed, Implied, 2, false, false, false);
    t[0xB8] = OpInfo::new(Clv, Implied, 2, false, false, false);

    // --- BRK / NOP ---
    t[0x00] = OpInfo::new(Brk, Implied, 7, false, false, false);
    t[0xEA] = OpInfo::new(Nop, Implied, 2, false, false, false);

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count_is_151() {
        let documented = OPCODES.iter().filter(|o| o.mnemonic != Mnemonic::Illegal).count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn lda_immediate_decodes_correctly() {
        let info = decode(0xA9);
        assert_eq!(info.mnemonic, Mnemonic::Lda);
        assert_eq!(info.mode, AddrMode::Immediate);
        assert_eq!(info.base_cycles, 2);
    }

    #[test]
    fn undocumented_opcode_decodes_illegal() {
        let info = decode(0x02);
        assert_eq!(info.mnemonic, Mnemonic::Illegal);
    }

    #[test]
    fn jmp_indirect_is_not_rmw_or_branch() {
        let info = decode(0x6C);
        assert_eq!(info.mode, AddrMode::Indirect);
        assert!(!info.rmw);
        assert!(!info.branch);
    }

    #[test]
    fn rmw_opcodes_flagged() {
        for op in [0x06u8, 0x16, 0x0E, 0x1E, 0xE6, 0xDE] {
            assert!(decode(op).rmw, "{:#04X} should be rmw", op);
        }
        assert!(!decode(0x0A).rmw); // ASL A is not memory RMW
    }

    #[test]
    fn branch_opcodes_flagged() {
        for op in [0x10u8, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            assert!(decode(op).branch);
            assert_eq!(decode(op).mode, AddrMode::Relative);
        }
    }
}
