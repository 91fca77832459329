use crate::common::config::{Diagnostic, Process, VmDiagnostic};
use codespan_reporting::diagnostic::Label;
use text_size::TextRange;

#[derive(Debug, Clone)]
pub enum AsmError {
    UnknownMnemonic {
        range: TextRange,
    },
    DuplicateLabel {
        original: TextRange,
        redefined: TextRange,
    },
    UnresolvedOperand {
        range: TextRange,
    },
    MalformedLine {
        range: TextRange,
    },
}

impl VmDiagnostic for AsmError {
    fn to_diagnostic(&self, process: &Process<'_>) -> Diagnostic {
        match self {
            Self::UnknownMnemonic { range } => Diagnostic::error()
                .with_message("unknown instruction")
                .with_labels(vec![Label::primary((), *range).with_message(format!(
                    "`{}` is not a recognized mnemonic",
                    &process.source()[*range]
                ))]),
            Self::DuplicateLabel {
                original,
                redefined,
            } => Diagnostic::error()
                .with_message("duplicate label")
                .with_labels(vec![
                    Label::secondary((), *original)
                        .with_message("the label is first defined here..."),
                    Label::primary((), *redefined).with_message("...but is redefined here"),
                ]),
            Self::UnresolvedOperand { range } => Diagnostic::error()
                .with_message("unresolved operand")
                .with_labels(vec![Label::primary((), *range).with_message(format!(
                    "`{}` is neither a defined label nor a 32-bit integer",
                    &process.source()[*range]
                ))]),
            Self::MalformedLine { range } => Diagnostic::error()
                .with_message("malformed line")
                .with_labels(vec![Label::primary((), *range)
                    .with_message("expected `name:` or a mnemonic with at most one operand")]),
        }
    }
}
