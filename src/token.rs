use std::fmt::{self, Display};

use phf::phf_map;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Looks `text` up in the reserved word table.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) literal: Option<String>,
    pub(crate) line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, lexeme: S, line: usize) -> Self {
        Token { kind, lexeme: lexeme.into(), literal: None, line }
    }

    pub fn with_literal<S, L>(kind: TokenKind, lexeme: S, literal: L, line: usize) -> Self
    where
        S: Into<String>,
        L: Into<String>,
    {
        Token { kind, lexeme: lexeme.into(), literal: Some(literal.into()), line }
    }

    pub fn end_of_file(line: usize) -> Self {
        Token::new(TokenKind::EndOfFile, "", line)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Decoded value for strings, numbers and identifiers. Numbers keep
    /// their source text; conversion happens downstream.
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_end_of_file(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.literal, self.kind) {
            (Some(literal), TokenKind::Identifier)
            | (Some(literal), TokenKind::String)
            | (Some(literal), TokenKind::Number) => write!(f, "{}", literal),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    LeftParen, RightParen, LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus, Semicolon, Slash, Star,

    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    Identifier, String, Number,

    And, Class, Else, False, Fun, For, If, Nil, Or,
    Print, Return, Super, This, True, Var, While,

    EndOfFile,
}
