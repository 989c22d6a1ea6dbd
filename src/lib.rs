#![doc = r#"
mos6502 — an interpreting emulator core for the MOS 6502 8-bit microprocessor.

Given a 64 KiB memory image and a reset vector, `Cpu` reproduces the
architectural effect of executing that image: register file, processor
status flags, and memory mutation, in the same observable order a physical
chip would produce them.

Modules:
- memory: the `Memory` trait and the crate's own `FlatMemory` implementation
- cpu: `Cpu`, its register/addressing/decode/operation internals, and the
  step/run driver
- error: `IllegalOpcode`, the single failure kind the core can raise

This crate is a library only; binary loaders, disassembly, debug printing,
and peripheral buses are a collaborator's responsibility. See the
`mos6502-run` binary (`src/bin/`) for a minimal CLI driver.
"#]

pub mod cpu;
pub mod error;
pub mod memory;

pub use cpu::{Cpu, CpuSnapshot, RunBudget, RunSummary, StepInfo, StopReason};
pub use error::IllegalOpcode;
pub use memory::{FlatMemory, Memory};
