#![allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]

use crate::{
    common::{config::RunConfig, Addr, BytecodeReader, Int, MEMORY_CELLS},
    vm::{disassemble_instruction, stack::Stack, Opcode, Trap},
};
use std::cmp::Ordering;
use std::io::{self, BufWriter, StdoutLock, Write};

/// The virtual machine.
///
/// Owns a program counter (the reader's offset), an operand stack, a
/// return-address stack, and 1024 cells of linear memory. All mutation goes
/// through the dispatch loop in [`run`](Vm::run).
pub struct Vm<'a, W = BufWriter<StdoutLock<'static>>> {
    code: BytecodeReader<'a>,
    stack: Stack<Int, 64>,
    calls: Stack<Addr, 32>,
    memory: Box<[Int]>,
    running: bool,
    out: W,
    config: RunConfig,
}

impl<'a> Vm<'a> {
    #[must_use]
    pub fn new(code: &'a [u8], config: RunConfig) -> Self {
        Self::with_output(code, config, BufWriter::new(io::stdout().lock()))
    }
}

impl<'a, W: Write> Vm<'a, W> {
    pub fn with_output(code: &'a [u8], config: RunConfig, out: W) -> Self {
        Self {
            code: BytecodeReader::new(code),
            stack: Stack::new(),
            calls: Stack::new(),
            memory: vec![0; MEMORY_CELLS].into_boxed_slice(),
            running: true,
            out,
            config,
        }
    }

    /// Re-zeroes memory, empties both stacks, rewinds the program counter,
    /// and re-enables execution.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.calls.clear();
        self.memory.fill(0);
        self.code.set_offset(0);
        self.running = true;
    }

    /// Top of the operand stack, or 0 when the stack is empty.
    #[must_use]
    pub fn result(&self) -> Int {
        self.top().unwrap_or(0)
    }

    #[must_use]
    pub fn top(&self) -> Option<Int> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.calls.len()
    }

    /// Executes until HALT, a trap, or the end of the bytecode.
    ///
    /// On a trap the machine stops and the trap is returned; running off the
    /// end of the code without a HALT is a clean termination.
    pub fn run(&mut self) -> Result<(), Trap> {
        while self.running && !self.code.is_at_end() {
            if self.config.trace_execution {
                self.trace_next();
            }
            if let Err(trap) = self.step() {
                self.running = false;
                return Err(trap);
            }
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), Trap> {
        let byte = self.fetch_byte()?;
        let opcode = Opcode::from_raw(byte).ok_or(Trap::UnknownOpcode { byte })?;

        match opcode {
            Opcode::Push => {
                let value = self.fetch_int()?;
                self.stack.push(value);
            }
            Opcode::Pop => {
                self.pop()?;
            }
            Opcode::Dup => {
                let top = self.top().ok_or(Trap::StackUnderflow)?;
                self.stack.push(top);
            }
            Opcode::Add => self.binary(|a, b| Ok(a.wrapping_add(b)))?,
            Opcode::Sub => self.binary(|a, b| Ok(a.wrapping_sub(b)))?,
            Opcode::Mul => self.binary(|a, b| Ok(a.wrapping_mul(b)))?,
            Opcode::Div => self.binary(|a, b| {
                if b == 0 {
                    Err(Trap::DivisionByZero)
                } else {
                    Ok(a.wrapping_div(b))
                }
            })?,
            Opcode::Cmp => self.binary(|a, b| {
                Ok(match a.cmp(&b) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                })
            })?,
            Opcode::Jmp => {
                let target = self.fetch_addr()?;
                self.branch(target)?;
            }
            Opcode::Jz => {
                // the operand is fetched and the predicate popped whether or
                // not the branch is taken
                let target = self.fetch_addr()?;
                if self.pop()? == 0 {
                    self.branch(target)?;
                }
            }
            Opcode::Jnz => {
                let target = self.fetch_addr()?;
                if self.pop()? != 0 {
                    self.branch(target)?;
                }
            }
            Opcode::Store => {
                let index = self.fetch_addr()?;
                let value = self.pop()?;
                let cell = self
                    .memory
                    .get_mut(index as usize)
                    .ok_or(Trap::StoreOutOfBounds { index })?;
                *cell = value;
            }
            Opcode::Load => {
                let index = self.fetch_addr()?;
                let value = *self
                    .memory
                    .get(index as usize)
                    .ok_or(Trap::LoadOutOfBounds { index })?;
                self.stack.push(value);
            }
            Opcode::Call => {
                let target = self.fetch_addr()?;
                let ret = self.code.offset() as Addr;
                self.branch(target)?;
                self.calls.push(ret);
            }
            Opcode::Ret => {
                let target = self.calls.pop().ok_or(Trap::ReturnWithoutCall)?;
                self.code.set_offset(target as usize);
            }
            Opcode::Print => {
                let value = self.pop()?;
                drop(writeln!(self.out, "VM PRINT: {value}"));
                if !self.config.trace_execution {
                    drop(self.out.flush());
                }
            }
            Opcode::Halt => self.running = false,
        }
        Ok(())
    }

    // b is popped first; the result of `a OP b` is pushed
    fn binary(&mut self, op: impl FnOnce(Int, Int) -> Result<Int, Trap>) -> Result<(), Trap> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.stack.push(op(a, b)?);
        Ok(())
    }

    fn pop(&mut self) -> Result<Int, Trap> {
        self.stack.pop().ok_or(Trap::StackUnderflow)
    }

    fn fetch_byte(&mut self) -> Result<u8, Trap> {
        self.code.take_byte().ok_or(Trap::UnexpectedEndOfBytecode)
    }

    fn fetch_int(&mut self) -> Result<Int, Trap> {
        self.code.take_int().ok_or(Trap::UnexpectedEndOfBytecode)
    }

    fn fetch_addr(&mut self) -> Result<Addr, Trap> {
        self.fetch_int().map(|value| value as Addr)
    }

    // jump and call targets must land inside the code
    fn branch(&mut self, target: Addr) -> Result<(), Trap> {
        if target as usize >= self.code.len() {
            return Err(Trap::InvalidJump { target });
        }
        self.code.set_offset(target as usize);
        Ok(())
    }

    fn trace_next(&mut self) {
        let mut code = self.code;
        let mut buf = String::new();
        disassemble_instruction(&mut code, &mut buf);
        print!("{buf}");
    }
}
