//! mos6502-run - a minimal CLI driver over the `mos6502` core.
//!
//! Loads a raw binary image into a `FlatMemory` at a chosen origin,
//! optionally overrides the reset vector, resets the CPU, then runs it
//! until an instruction/cycle budget is exhausted or an illegal opcode is
//! hit. This is NOT a loader, disassembler, or NES front-end — just the
//! ambient CLI surface a library of this shape always carries.

use clap::Parser;
use mos6502::{Cpu, FlatMemory, Memory, RunBudget, StopReason};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Run a raw 6502 binary image", long_about = None)]
struct Args {
    /// Path to the raw binary program image.
    #[arg(long)]
    image: PathBuf,

    /// Address to load the image at.
    #[arg(long, value_parser = parse_u16)]
    origin: u16,

    /// Override the reset vector ($FFFC/$FFFD) instead of defaulting to
    /// `origin`.
    #[arg(long, value_parser = parse_u16)]
    reset: Option<u16>,

    /// Stop after executing this many instructions.
    #[arg(long, conflicts_with = "max_cycles")]
    max_instructions: Option<u64>,

    /// Stop once at least this many cycles have been consumed.
    #[arg(long, conflicts_with = "max_instructions")]
    max_cycles: Option<u64>,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix('$')) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    u16::from_str_radix(digits, radix).map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let program = std::fs::read(&args.image)
        .map_err(|e| format!("failed to read {}: {e}", args.image.display()))?;

    let mut mem = FlatMemory::new();
    mem.load(args.origin, &program);
    mem.write_u16(0xFFFC, args.reset.unwrap_or(args.origin));

    let mut cpu = Cpu::new();
    cpu.reset(&mem);

    println!(
        "loaded {} bytes at ${:04X}, reset vector -> ${:04X}",
        program.len(),
        args.origin,
        cpu.pc()
    );

    let budget = match (args.max_instructions, args.max_cycles) {
        (Some(n), None) => RunBudget::Steps(n),
        (None, Some(n)) => RunBudget::Cycles(n),
        (None, None) => RunBudget::Steps(1),
        (Some(_), Some(_)) => unreachable!("clap enforces mutual exclusion"),
    };

    let summary = cpu.run_for(&mut mem, budget);

    println!(
        "PC={:#06X} A={:#04X} X={:#04X} Y={:#04X} SP={:#04X} P={:#010b}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.status()
    );
    println!("steps={} cycles={}", summary.steps, summary.cycles);

    match summary.reason {
        StopReason::BudgetExhausted => Ok(()),
        StopReason::IllegalOpcode(err) => Err(err.to_string()),
    }
}
