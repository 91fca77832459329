use crate::common::Addr;
use std::fmt;

/// An unrecoverable runtime condition.
///
/// The first trap stops the machine; no further instructions execute.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Trap {
    StackUnderflow,
    DivisionByZero,
    StoreOutOfBounds { index: Addr },
    LoadOutOfBounds { index: Addr },
    InvalidJump { target: Addr },
    UnexpectedEndOfBytecode,
    ReturnWithoutCall,
    UnknownOpcode { byte: u8 },
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow => write!(f, "operand stack underflow"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::StoreOutOfBounds { index } => {
                write!(f, "memory store index {index} is out of bounds")
            }
            Self::LoadOutOfBounds { index } => {
                write!(f, "memory load index {index} is out of bounds")
            }
            Self::InvalidJump { target } => write!(f, "invalid jump target {target}"),
            Self::UnexpectedEndOfBytecode => write!(f, "unexpected end of bytecode"),
            Self::ReturnWithoutCall => write!(f, "return without a matching call"),
            Self::UnknownOpcode { byte } => write!(f, "unknown opcode 0x{byte:02X}"),
        }
    }
}

impl std::error::Error for Trap {}
