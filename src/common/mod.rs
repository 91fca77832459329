mod bytes;
pub mod config;

pub use bytes::{BytecodeBuilder, BytecodeReader};

/// Signed 32-bit cell: operand stack entries, memory cells, and immediates.
pub type Int = i32;
/// Byte offset into a bytecode stream.
pub type Addr = u32;

/// Number of linear-memory cells owned by a VM instance.
pub const MEMORY_CELLS: usize = 1024;
