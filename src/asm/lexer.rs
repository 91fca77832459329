use logos::Logos;
use text_size::{TextRange, TextSize};

pub type Token = (TextRange, TokenKind);

#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    TokenKind::lexer(source)
        .spanned()
        .map(|(kind, span)| {
            let range = TextRange::new(
                TextSize::from(span.start as u32),
                TextSize::from(span.end as u32),
            );
            (range, kind)
        })
        .collect()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"-?[0-9]+")]
    IntLiteral,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    #[regex(r"[ \t]+")]
    Whitespace,
    #[regex(r";[^\r\n]*")]
    Comment,
    #[regex(r"(\r\n|\r|\n)+")]
    LineBreak,

    #[error]
    Error,
}

impl TokenKind {
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}
