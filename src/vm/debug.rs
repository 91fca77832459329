use crate::{
    common::{Addr, BytecodeReader},
    vm::Opcode,
};
use std::fmt::Write;

/// Renders the instruction at the reader's offset and advances past it.
pub fn disassemble_instruction(code: &mut BytecodeReader<'_>, buf: &mut String) {
    let offset = code.offset();
    let Some(byte) = code.take_byte() else { return };

    let Some(opcode) = Opcode::from_raw(byte) else {
        let _ = writeln!(buf, "{offset:>04} | ??? (0x{byte:02X})");
        return;
    };

    let _ = write!(buf, "{offset:>04} | {}", opcode.as_str());
    if opcode.has_operand() {
        match code.take_int() {
            // branch targets read as addresses, everything else as integers
            #[allow(clippy::cast_sign_loss)]
            Some(value) => match opcode {
                Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Call => {
                    let _ = write!(buf, " @{}", value as Addr);
                }
                _ => {
                    let _ = write!(buf, " {value}");
                }
            },
            None => {
                let _ = write!(buf, " <truncated>");
                code.set_offset(code.len());
            }
        }
    }
    let _ = writeln!(buf);
}

#[must_use]
pub fn disassemble(mut code: BytecodeReader<'_>) -> String {
    let mut buf = String::new();
    while !code.is_at_end() {
        disassemble_instruction(&mut code, &mut buf);
    }
    buf.pop();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    fn check(code: &[u8], expect: Expect) {
        expect.assert_eq(&disassemble(BytecodeReader::new(code)));
    }

    #[test]
    fn constant_program() {
        check(
            &[0x01, 0x00, 0x00, 0x00, 0x2A, 0xFF],
            expect![
                "\
0000 | PUSH 42
0005 | HALT"
            ],
        );
    }

    #[test]
    fn branches_print_as_addresses() {
        check(
            &[0x20, 0x00, 0x00, 0x00, 0x06, 0x41, 0xFF],
            expect![
                "\
0000 | JMP @6
0005 | RET
0006 | HALT"
            ],
        );
    }

    #[test]
    fn unknown_and_truncated_bytes() {
        check(
            &[0x99, 0x01, 0x00],
            expect![
                "\
0000 | ??? (0x99)
0001 | PUSH <truncated>"
            ],
        );
    }
}
