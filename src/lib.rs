#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::match_same_arms,
    clippy::enum_glob_use
)]

pub mod asm;
mod common;
pub mod vm;

pub use asm::{AsmError, Assembled};
pub use common::{
    config::{self, Diagnostic, Process, RunConfig, VmDiagnostic},
    Addr, BytecodeBuilder, BytecodeReader, Int, MEMORY_CELLS,
};
pub use vm::{disassemble, disassemble_instruction, Opcode, Trap, Vm};

pub type Result<T> = std::result::Result<T, Vec<Diagnostic>>;

fn errors_to_diagnostics<T: VmDiagnostic>(
    errors: impl IntoIterator<Item = T>,
    process: &Process<'_>,
) -> Vec<Diagnostic> {
    errors
        .into_iter()
        .map(|err| err.to_diagnostic(process))
        .collect()
}

/// Translates an assembly source file into a bytecode image.
///
/// Errors are collected across the whole file rather than stopping at the
/// first bad line, so one invocation reports every diagnosable problem.
pub fn assemble(process: &Process<'_>) -> Result<Assembled> {
    asm::assemble(process).map_err(|errors| errors_to_diagnostics(errors, process))
}
