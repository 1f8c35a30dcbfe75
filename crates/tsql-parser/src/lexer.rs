//! Hand-written lexer for T-SQL source text.
//!
//! The lexer is context-free: it does not know what the parser is in the
//! middle of. All disambiguation (variable prefixes, keywords as
//! identifiers, hint names) happens in the parser. Lex failures surface as
//! [`TokenKind::Error`] tokens so positions survive into the parse phase.

use memchr::memchr;
use tsql_ast::Span;

use crate::error::LexErrorKind;
use crate::token::{Token, TokenKind};

/// Tokenize a complete source string.
///
/// The returned vector always ends with an `Eof` token. If a lexical error
/// occurs, the last token before `Eof` is an `Error` token and lexing stops.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = matches!(token.kind, TokenKind::Eof | TokenKind::Error(_));
        tokens.push(token);
        if done {
            break;
        }
    }
    if !matches!(
        tokens.last().map(|t| &t.kind),
        Some(TokenKind::Eof)
    ) {
        let span = Span::new(lexer.pos as u32, lexer.pos as u32);
        tokens.push(Token::new(TokenKind::Eof, span, lexer.line, lexer.col));
    }
    tokens
}

/// Streaming tokenizer over a UTF-8 source buffer.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`. A leading BOM is skipped.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let src = source.as_bytes();
        let pos = if src.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            src,
            pos,
            line: 1,
            col: 1,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_byte_at(&self, n: usize) -> Option<u8> {
        self.src.get(self.pos + n).copied()
    }

    /// Advance one byte, tracking line and column.
    fn bump(&mut self) {
        if let Some(b) = self.peek_byte() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Advance to an absolute position, tracking newlines in between.
    fn advance_to(&mut self, new_pos: usize) {
        while self.pos < new_pos {
            self.bump();
        }
    }

    /// Produce the next token. Returns `Eof` indefinitely at end of input.
    pub fn next_token(&mut self) -> Token {
        if let Some(err) = self.skip_whitespace_and_comments() {
            return err;
        }

        let start = self.pos;
        let (line, col) = (self.line, self.col);
        let token = |kind: TokenKind, lexer: &Self| {
            Token::new(kind, Span::new(start as u32, lexer.pos as u32), line, col)
        };

        let Some(b) = self.peek_byte() else {
            return token(TokenKind::Eof, self);
        };

        match b {
            b'[' => {
                let kind = self.lex_quoted(b']', LexErrorKind::UnterminatedBracket, |v| {
                    TokenKind::BracketedIdent(v)
                });
                token(kind, self)
            }
            b'"' => {
                let kind = self.lex_quoted(b'"', LexErrorKind::UnterminatedBracket, |v| {
                    TokenKind::QuotedIdent(v)
                });
                token(kind, self)
            }
            b'\'' => {
                let kind = self.lex_quoted(b'\'', LexErrorKind::UnterminatedString, |v| {
                    TokenKind::String(v)
                });
                token(kind, self)
            }
            b'N' | b'n' if self.peek_byte_at(1) == Some(b'\'') => {
                self.bump();
                let kind = self.lex_quoted(b'\'', LexErrorKind::UnterminatedString, |v| {
                    TokenKind::NationalString(v)
                });
                token(kind, self)
            }
            b'0' if matches!(self.peek_byte_at(1), Some(b'x' | b'X')) => {
                self.bump();
                self.bump();
                while self
                    .peek_byte()
                    .is_some_and(|b| b.is_ascii_hexdigit())
                {
                    self.bump();
                }
                let text = self.text_from(start);
                token(TokenKind::Binary(text), self)
            }
            b'0'..=b'9' => {
                let kind = self.lex_number();
                token(kind, self)
            }
            b'.' if self.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                let kind = self.lex_number();
                token(kind, self)
            }
            b'@' => {
                self.bump();
                if self.peek_byte() == Some(b'@') {
                    self.bump();
                }
                self.consume_ident_tail();
                token(TokenKind::Ident(self.text_from(start)), self)
            }
            b'$' => {
                self.bump();
                self.consume_ident_tail();
                token(TokenKind::Ident(self.text_from(start)), self)
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' | b'#' => {
                self.bump();
                self.consume_ident_tail();
                let text = self.text_from(start);
                let kind = TokenKind::lookup_keyword(&text)
                    .unwrap_or(TokenKind::Ident(text));
                token(kind, self)
            }
            _ => {
                let kind = self.lex_operator(b);
                token(kind, self)
            }
        }
    }

    // -- scanning helpers ---------------------------------------------------

    fn text_from(&self, start: usize) -> String {
        // The lexer only advances on byte boundaries it has inspected, so
        // the slice is valid UTF-8 whenever the input was.
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    fn consume_ident_tail(&mut self) {
        while self.peek_byte().is_some_and(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'#')
        }) {
            self.bump();
        }
    }

    /// Lex a quoted region after the opening delimiter, with the delimiter
    /// doubled as an escape. Returns the token kind, or an error kind when
    /// the region never terminates.
    fn lex_quoted(
        &mut self,
        close: u8,
        unterminated: LexErrorKind,
        make: impl Fn(String) -> TokenKind,
    ) -> TokenKind {
        self.bump();
        let mut value = String::new();
        loop {
            let rest = &self.src[self.pos..];
            let Some(idx) = memchr(close, rest) else {
                self.advance_to(self.src.len());
                return TokenKind::Error(unterminated);
            };
            value.push_str(&String::from_utf8_lossy(&rest[..idx]));
            self.advance_to(self.pos + idx + 1);
            if self.peek_byte() == Some(close) {
                value.push(close as char);
                self.bump();
            } else {
                return make(value);
            }
        }
    }

    fn lex_number(&mut self) -> TokenKind {
        let start = self.pos;
        let mut is_numeric = false;
        while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        if self.peek_byte() == Some(b'.')
            && self.peek_byte_at(1).is_none_or(|b| b != b'.')
        {
            // One decimal point; a trailing dot (`1.`) is still numeric.
            is_numeric = true;
            self.bump();
            while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E'))
            && (self.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit())
                || (matches!(self.peek_byte_at(1), Some(b'+' | b'-'))
                    && self.peek_byte_at(2).is_some_and(|b| b.is_ascii_digit())))
        {
            is_numeric = true;
            self.bump();
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.bump();
            }
            while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = self.text_from(start);
        if is_numeric {
            TokenKind::Numeric(text)
        } else {
            TokenKind::Integer(text)
        }
    }

    fn lex_operator(&mut self, b: u8) -> TokenKind {
        let next = self.peek_byte_at(1);
        let (kind, len) = match (b, next) {
            (b':', Some(b':')) => (TokenKind::DoubleColon, 2),
            (b'|', Some(b'|')) => (TokenKind::Concat, 2),
            (b'<', Some(b'=')) => (TokenKind::LessEqual, 2),
            (b'>', Some(b'=')) => (TokenKind::GreaterEqual, 2),
            (b'<', Some(b'>')) => (TokenKind::NotEqual, 2),
            (b'!', Some(b'=')) => (TokenKind::BangEqual, 2),
            (b'!', Some(b'<')) => (TokenKind::BangLess, 2),
            (b'!', Some(b'>')) => (TokenKind::BangGreater, 2),
            (b'<', Some(b'<')) => (TokenKind::ShiftLeft, 2),
            (b'>', Some(b'>')) => (TokenKind::ShiftRight, 2),
            (b'+', Some(b'=')) => (TokenKind::PlusEq, 2),
            (b'-', Some(b'=')) => (TokenKind::MinusEq, 2),
            (b'*', Some(b'=')) => (TokenKind::StarEq, 2),
            (b'/', Some(b'=')) => (TokenKind::SlashEq, 2),
            (b'%', Some(b'=')) => (TokenKind::PercentEq, 2),
            (b'&', Some(b'=')) => (TokenKind::AmpEq, 2),
            (b'|', Some(b'=')) => (TokenKind::PipeEq, 2),
            (b'^', Some(b'=')) => (TokenKind::CaretEq, 2),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'{', _) => (TokenKind::LBrace, 1),
            (b'}', _) => (TokenKind::RBrace, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b';', _) => (TokenKind::Semicolon, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            (b':', _) => (TokenKind::Colon, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::PercentSign, 1),
            (b'&', _) => (TokenKind::Ampersand, 1),
            (b'|', _) => (TokenKind::Pipe, 1),
            (b'^', _) => (TokenKind::Caret, 1),
            (b'~', _) => (TokenKind::Tilde, 1),
            (b'=', _) => (TokenKind::Eq, 1),
            (b'<', _) => (TokenKind::LessThan, 1),
            (b'>', _) => (TokenKind::GreaterThan, 1),
            _ => {
                // Decode the full character for the message.
                let rest = String::from_utf8_lossy(&self.src[self.pos..]);
                let c = rest.chars().next().unwrap_or('\u{fffd}');
                self.advance_to(self.pos + c.len_utf8().max(1));
                return TokenKind::Error(LexErrorKind::UnrecognizedChar(c));
            }
        };
        for _ in 0..len {
            self.bump();
        }
        kind
    }

    /// Skip whitespace, `-- ...` line comments, and `/* ... */` block
    /// comments. Block comments do not nest. Returns an error token if a
    /// block comment never closes.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.peek_byte() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C) => self.bump(),
                Some(b'-') if self.peek_byte_at(1) == Some(b'-') => {
                    while self.peek_byte().is_some_and(|b| b != b'\n') {
                        self.bump();
                    }
                }
                Some(b'/') if self.peek_byte_at(1) == Some(b'*') => {
                    let start = self.pos;
                    let (line, col) = (self.line, self.col);
                    self.bump();
                    self.bump();
                    loop {
                        if self.pos >= self.src.len() {
                            return Some(Token::new(
                                TokenKind::Error(LexErrorKind::UnterminatedBlockComment),
                                Span::new(start as u32, self.pos as u32),
                                line,
                                col,
                            ));
                        }
                        if self.peek_byte() == Some(b'*')
                            && self.peek_byte_at(1) == Some(b'/')
                        {
                            self.bump();
                            self.bump();
                            break;
                        }
                        self.bump();
                    }
                }
                _ => return None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_idents() {
        assert_eq!(
            kinds("SELECT foo FROM bar"),
            vec![
                TokenKind::KwSelect,
                TokenKind::Ident("foo".into()),
                TokenKind::KwFrom,
                TokenKind::Ident("bar".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert_eq!(kinds("select")[0], TokenKind::KwSelect);
        assert_eq!(kinds("SeLeCt")[0], TokenKind::KwSelect);
    }

    #[test]
    fn string_with_doubled_quote_escape() {
        assert_eq!(kinds("'it''s'")[0], TokenKind::String("it's".into()));
    }

    #[test]
    fn national_string_either_case() {
        assert_eq!(
            kinds("N'x'")[0],
            TokenKind::NationalString("x".into())
        );
        assert_eq!(
            kinds("n'x'")[0],
            TokenKind::NationalString("x".into())
        );
    }

    #[test]
    fn bracketed_identifier_with_escape() {
        assert_eq!(
            kinds("[a]]b]")[0],
            TokenKind::BracketedIdent("a]b".into())
        );
    }

    #[test]
    fn double_quoted_identifier() {
        assert_eq!(kinds("\"a\"\"b\"")[0], TokenKind::QuotedIdent("a\"b".into()));
    }

    #[test]
    fn numbers() {
        assert_eq!(kinds("42")[0], TokenKind::Integer("42".into()));
        assert_eq!(kinds("3.14")[0], TokenKind::Numeric("3.14".into()));
        assert_eq!(kinds(".5")[0], TokenKind::Numeric(".5".into()));
        assert_eq!(kinds("1e10")[0], TokenKind::Numeric("1e10".into()));
        assert_eq!(kinds("2E-3")[0], TokenKind::Numeric("2E-3".into()));
        assert_eq!(kinds("0xDEADbeef")[0], TokenKind::Binary("0xDEADbeef".into()));
    }

    #[test]
    fn variables_keep_their_prefix() {
        assert_eq!(kinds("@p")[0], TokenKind::Ident("@p".into()));
        assert_eq!(kinds("@@ROWCOUNT")[0], TokenKind::Ident("@@ROWCOUNT".into()));
        assert_eq!(kinds("$ACTION")[0], TokenKind::Ident("$ACTION".into()));
    }

    #[test]
    fn multi_char_operators_longest_match() {
        assert_eq!(
            kinds("<= >= <> != !< !> << >> :: || += -="),
            vec![
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::NotEqual,
                TokenKind::BangEqual,
                TokenKind::BangLess,
                TokenKind::BangGreater,
                TokenKind::ShiftLeft,
                TokenKind::ShiftRight,
                TokenKind::DoubleColon,
                TokenKind::Concat,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("1 -- comment\n2 /* block\ncomment */ 3"),
            vec![
                TokenKind::Integer("1".into()),
                TokenKind::Integer("2".into()),
                TokenKind::Integer("3".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn block_comments_do_not_nest() {
        // The first `*/` closes the comment; the rest is live input.
        assert_eq!(
            kinds("/* /* */ SELECT"),
            vec![TokenKind::KwSelect, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let toks = kinds("'unterminated");
        assert_eq!(
            toks[0],
            TokenKind::Error(LexErrorKind::UnterminatedString)
        );
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let toks = kinds("/* never closed");
        assert_eq!(
            toks[0],
            TokenKind::Error(LexErrorKind::UnterminatedBlockComment)
        );
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(kinds("\u{feff}SELECT")[0], TokenKind::KwSelect);
    }

    #[test]
    fn line_and_column_tracking() {
        let toks = tokenize("SELECT\n  x");
        assert_eq!(toks[0].line, 1);
        assert_eq!(toks[0].col, 1);
        assert_eq!(toks[1].line, 2);
        assert_eq!(toks[1].col, 3);
    }

    #[test]
    fn temp_table_names_lex_as_idents() {
        assert_eq!(kinds("#tmp")[0], TokenKind::Ident("#tmp".into()));
    }
}
