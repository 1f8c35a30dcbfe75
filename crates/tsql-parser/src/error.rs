//! Error types for lexing and parsing.

use thiserror::Error;

/// What went wrong while scanning a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedBracket,
    UnterminatedBlockComment,
    UnrecognizedChar(char),
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedString => f.write_str("unterminated string literal"),
            Self::UnterminatedBracket => f.write_str("unterminated bracketed identifier"),
            Self::UnterminatedBlockComment => f.write_str("unterminated block comment"),
            Self::UnrecognizedChar(c) => write!(f, "unrecognized character {c:?}"),
        }
    }
}

/// A lexical error with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset into the source.
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

/// An error produced while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The parser met a token it cannot accept at this grammar point.
    /// `expected` is filled when a single continuation was required.
    #[error("{line}:{col}: expected {}, got {got}", .expected.as_deref().unwrap_or("a different token"))]
    Unexpected {
        expected: Option<String>,
        got: String,
        /// Byte offset into the source.
        offset: u32,
        line: u32,
        col: u32,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    /// A parser bug surfaced at runtime. Should never be observed.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    pub(crate) fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_owned())
    }
}
