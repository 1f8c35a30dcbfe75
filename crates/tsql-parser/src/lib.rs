//! Hand-written T-SQL lexer and single-token-lookahead recursive descent
//! parser. Produces a statement-level AST from `tsql-ast`.

mod boolean;
mod ddl;
mod dml;
mod error;
mod expr;
mod from;
mod hints;
pub mod lexer;
pub mod parser;
mod query;
pub mod token;

pub use error::{LexError, LexErrorKind, ParseError};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_with_options, Parser, ParserOptions};
pub use token::{Token, TokenKind};
