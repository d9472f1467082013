//! Front end for the Lox expression language: a scanner that turns
//! source text into tokens and a recursive-descent parser that turns
//! tokens into an expression tree. Problems are reported as
//! [`ErrorEvent`]s through a [`Reporter`] owned by the caller.

pub mod error;
pub mod expr;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;

pub use crate::error::{Diagnostics, Error, ErrorEvent, ErrorKind, Reporter, Result};
pub use crate::expr::{Expr, LiteralValue, Visitor};
pub use crate::parser::Parser;
pub use crate::scanner::Scanner;
pub use crate::token::{Token, TokenKind};

/// Scans `source` into tokens ending with `TokenKind::EndOfFile`.
pub fn scan<R: Reporter + ?Sized>(source: &str, reporter: &mut R) -> Vec<Token> {
    Scanner::new(source).scan_tokens(reporter)
}

/// Parses `tokens` into a single expression, or reports why it couldn't.
pub fn parse<R: Reporter + ?Sized>(tokens: Vec<Token>, reporter: &mut R) -> Option<Expr> {
    Parser::new(tokens).parse(reporter)
}
