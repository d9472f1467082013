use std::fmt::{self, Display};
use std::result;

use log::warn;
use thiserror::Error as ThisError;

use crate::token::Token;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    Lexical,
    Syntactic { token: Token },
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Error {
    kind: ErrorKind,
    line: usize,
    location: String,
    message: String,
}

impl Error {
    pub fn lexical<S: Into<String>>(line: usize, message: S) -> Error {
        Error { kind: ErrorKind::Lexical, line, location: String::new(), message: message.into() }
    }

    pub fn syntactic<S: Into<String>>(token: Token, message: S) -> Error {
        let location = if token.is_end_of_file() {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        let line = token.line;
        let kind = ErrorKind::Syntactic { token };
        Error { kind, line, location, message: message.into() }
    }

    /// The token stream ran dry without an end-of-input marker.
    pub fn unexpected(line: usize) -> Error {
        Error {
            kind: ErrorKind::Unexpected,
            line,
            location: " at end".into(),
            message: "Unexpected end of input.".into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_event(&self) -> ErrorEvent {
        ErrorEvent {
            line: self.line,
            location: self.location.clone(),
            message: self.message.clone(),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(Other, e)
    }
}

/// One reported problem: where it happened and what went wrong.
/// `location` is empty for lexical errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub line: usize,
    pub location: String,
    pub message: String,
}

impl From<&Error> for ErrorEvent {
    fn from(e: &Error) -> Self {
        e.to_event()
    }
}

impl Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line, self.location, self.message)
    }
}

/// Sink for errors found while scanning or parsing. The scanner and
/// parser only ever append; clearing between runs is up to the owner.
pub trait Reporter {
    fn add(&mut self, line: usize, location: &str, message: &str);

    fn has_error(&self) -> bool;

    fn report(&mut self, e: &Error) {
        warn!("{}", e);
        self.add(e.line, &e.location, &e.message);
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<ErrorEvent>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ErrorEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Reporter for Diagnostics {
    fn add(&mut self, line: usize, location: &str, message: &str) {
        self.events.push(ErrorEvent {
            line,
            location: location.to_string(),
            message: message.to_string(),
        });
    }

    fn has_error(&self) -> bool {
        !self.events.is_empty()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in self.events.iter() {
            writeln!(f, "{}", e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn lexical_errors_have_no_location() {
        let e = Error::lexical(4, "Unexpected character: #");
        assert_eq!("[line 4] Error: Unexpected character: #", e.to_string());
        assert_eq!("", e.location());
        assert_eq!(&ErrorKind::Lexical, e.kind());
        assert_eq!("Unexpected character: #", e.message());
    }

    #[test]
    fn syntactic_errors_point_at_the_lexeme() {
        let token = Token::new(TokenKind::Plus, "+", 2);
        let e = Error::syntactic(token, "Expect expression.");
        assert_eq!("[line 2] Error at '+': Expect expression.", e.to_string());
    }

    #[test]
    fn syntactic_errors_at_end_of_input() {
        let e = Error::syntactic(Token::end_of_file(7), "Expect expression.");
        assert_eq!("[line 7] Error at end: Expect expression.", e.to_string());
    }

    #[test]
    fn events_keep_the_error_parts() {
        let e = Error::syntactic(Token::new(TokenKind::Star, "*", 1), "Oops.");
        let event = ErrorEvent::from(&e);
        assert_eq!(
            ErrorEvent { line: 1, location: " at '*'".into(), message: "Oops.".into() },
            event
        );
        assert_eq!(e.to_string(), event.to_string());
    }

    #[test]
    fn diagnostics_accumulate_until_cleared() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_error());

        diagnostics.report(&Error::lexical(1, "first"));
        diagnostics.add(2, "", "second");
        assert!(diagnostics.has_error());
        assert_eq!(2, diagnostics.len());
        assert_eq!("[line 1] Error: first\n[line 2] Error: second\n", diagnostics.to_string());

        diagnostics.clear();
        assert!(!diagnostics.has_error());
        assert!(diagnostics.is_empty());
    }
}
