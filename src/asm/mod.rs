//! The two-pass assembler.
//!
//! Pass 1 lays the program out: it records the byte address of every label
//! and keeps the instruction lines for later. Pass 2 re-walks the kept lines
//! and emits opcodes and operands, resolving label names through the pass-1
//! table. Forward references cost nothing because emission only starts once
//! every label address is known.

mod error;
mod lexer;

pub use error::AsmError;
pub use lexer::{lex, Token, TokenKind};

use crate::{
    common::{config::Process, Addr, BytecodeBuilder, Int},
    vm::Opcode,
};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use text_size::TextRange;

/// The output of a successful assembly: the bytecode image plus the label
/// table in definition order.
#[derive(Debug)]
pub struct Assembled {
    pub code: Box<[u8]>,
    pub labels: Vec<(String, Addr)>,
}

struct LabelDef {
    addr: Addr,
    range: TextRange,
}

// one instruction line, retained between the passes
struct InstrRecord {
    mnemonic: TextRange,
    operand: Option<(TextRange, TokenKind)>,
}

enum Line {
    Blank,
    Label {
        name: TextRange,
    },
    Instr {
        mnemonic: TextRange,
        operand: Option<(TextRange, TokenKind)>,
    },
    Malformed {
        range: TextRange,
    },
}

pub fn assemble(process: &Process<'_>) -> Result<Assembled, Vec<AsmError>> {
    let source = process.source();
    let tokens = lex(source);
    let mut errors = Vec::new();

    // ---- pass 1: label layout ----
    let mut labels = FxHashMap::<&str, LabelDef>::default();
    let mut order = Vec::<&str>::new();
    let mut instrs = Vec::<InstrRecord>::new();
    let mut pc: Addr = 0;

    for line in tokens.split(|&(_, kind)| kind == TokenKind::LineBreak) {
        match classify(line) {
            Line::Blank => {}
            Line::Label { name } => match labels.entry(&source[name]) {
                Entry::Occupied(entry) => errors.push(AsmError::DuplicateLabel {
                    original: entry.get().range,
                    redefined: name,
                }),
                Entry::Vacant(entry) => {
                    entry.insert(LabelDef {
                        addr: pc,
                        range: name,
                    });
                    order.push(&source[name]);
                }
            },
            Line::Instr { mnemonic, operand } => {
                // Layout is driven by the source text: an operand token on
                // the line reserves four bytes whether or not the opcode
                // calls for one. Pass 2 emits the same shape, which keeps
                // every label address computed here valid.
                pc += 1;
                if operand.is_some() {
                    pc += 4;
                }
                instrs.push(InstrRecord { mnemonic, operand });
            }
            Line::Malformed { range } => errors.push(AsmError::MalformedLine { range }),
        }
    }

    // ---- pass 2: emission ----
    let mut code = BytecodeBuilder::default();
    for instr in &instrs {
        let Some(opcode) = Opcode::from_mnemonic(&source[instr.mnemonic]) else {
            errors.push(AsmError::UnknownMnemonic {
                range: instr.mnemonic,
            });
            continue;
        };
        code.push_byte(opcode as u8);
        if let Some((range, kind)) = instr.operand {
            match resolve_operand(source, &labels, range, kind) {
                Some(value) => code.push_int(value),
                None => errors.push(AsmError::UnresolvedOperand { range }),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    let labels = order
        .into_iter()
        .map(|name| (name.to_owned(), labels[name].addr))
        .collect();
    Ok(Assembled {
        code: code.into_inner(),
        labels,
    })
}

fn classify(line: &[Token]) -> Line {
    let mut tokens = line.iter().copied().filter(|&(_, kind)| !kind.is_trivia());
    let Some(first) = tokens.next() else {
        return Line::Blank;
    };
    let rest: Vec<Token> = tokens.collect();

    match (first, rest.as_slice()) {
        ((name, TokenKind::Ident), [(_, TokenKind::Colon)]) => Line::Label { name },
        ((mnemonic, TokenKind::Ident), []) => Line::Instr {
            mnemonic,
            operand: None,
        },
        ((mnemonic, TokenKind::Ident), rest) => match operand_of(rest) {
            Some(operand) => Line::Instr {
                mnemonic,
                operand: Some(operand),
            },
            None => Line::Malformed {
                range: first.0.cover(rest[rest.len() - 1].0),
            },
        },
        ((range, _), rest) => Line::Malformed {
            range: rest
                .last()
                .map_or(range, |&(last, _)| range.cover(last)),
        },
    }
}

// a single operand token, allowing a separator comma on either side
fn operand_of(mut rest: &[Token]) -> Option<(TextRange, TokenKind)> {
    if let [(_, TokenKind::Comma), tail @ ..] = rest {
        rest = tail;
    }
    if let [head @ .., (_, TokenKind::Comma)] = rest {
        rest = head;
    }
    match rest {
        [(range, kind @ (TokenKind::Ident | TokenKind::IntLiteral))] => Some((*range, *kind)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_wrap)]
fn resolve_operand(
    source: &str,
    labels: &FxHashMap<&str, LabelDef>,
    range: TextRange,
    kind: TokenKind,
) -> Option<Int> {
    let text = &source[range];
    match kind {
        // a known label wins; otherwise the token must be an integer
        TokenKind::Ident => labels.get(text).map(|def| def.addr as Int),
        TokenKind::IntLiteral => text.parse::<Int>().ok(),
        _ => None,
    }
}
