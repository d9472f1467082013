use std::iter::Peekable;

use log::{debug, trace};

use crate::{
    error::{Error, Reporter, Result},
    expr::{Expr, LiteralValue},
    token::*,
};

const EQUALITY_TOKENS: &[TokenKind] = &[
    TokenKind::BangEqual,
    TokenKind::EqualEqual,
];

const COMPARISON_TOKENS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];

const TERM_TOKENS: &[TokenKind] = &[
    TokenKind::Minus,
    TokenKind::Plus,
];

const FACTOR_TOKENS: &[TokenKind] = &[
    TokenKind::Slash,
    TokenKind::Star,
];

const UNARY_TOKENS: &[TokenKind] = &[
    TokenKind::Bang,
    TokenKind::Minus,
];

/// Deepest run of nested groupings and unary operators accepted before
/// the parser gives up instead of exhausting the stack.
const MAX_NESTING: usize = 64;

/// Recursive-descent parser over a token stream ending in
/// `TokenKind::EndOfFile`, producing a single expression.
///
/// ```text
/// expression → equality
/// equality   → comparison ( ( "!=" | "==" ) comparison )*
/// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       → factor ( ( "-" | "+" ) factor )*
/// factor     → unary ( ( "/" | "*" ) unary )*
/// unary      → ( "!" | "-" ) unary | primary
/// primary    → NUMBER | STRING | "true" | "false" | "nil"
///            | "(" expression ")"
/// ```
pub struct Parser<T> {
    tokens: T,
    line: usize,
    depth: usize,
}

impl <T: Iterator<Item = Token>> Parser<Peekable<T>> {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token, IntoIter = T>,
    {
        let tokens = tokens.into_iter().peekable();
        Parser { tokens, line: 1, depth: 0 }
    }

    /// Parses one expression. On a syntax error the error goes to
    /// `reporter` and no tree is returned. Tokens after a complete
    /// expression are left unread.
    pub fn parse<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Option<Expr> {
        match self.expression() {
            Ok(e) => {
                debug!("parsed expression ending on line {}", self.line);
                Some(e)
            },
            Err(e) => {
                reporter.report(&e);
                None
            },
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::comparison,
            EQUALITY_TOKENS
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::term,
            COMPARISON_TOKENS
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::factor,
            TERM_TOKENS
        )
    }

    fn factor(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::unary,
            FACTOR_TOKENS
        )
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(token) = self.match_any(UNARY_TOKENS) {
            let right = Box::new(self.nested(Self::unary)?);
            Ok(Expr::new_unary(token, right))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let next = self.peek()?.clone();
        let kind = next.kind;

        let value = match kind {
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::Nil => LiteralValue::Nil,
            TokenKind::Number => LiteralValue::Number(literal_text(next)),
            TokenKind::String => LiteralValue::String(literal_text(next)),
            TokenKind::LeftParen => {
                self.advance()?;
                let expression = Box::new(self.nested(Self::expression)?);
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::new_grouping(expression))
            },
            _ => return Err(Error::syntactic(next, "Expect expression.")),
        };

        self.advance()?;
        Ok(Expr::new_literal(value))
    }

    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<Expr>) -> Result<Expr> {
        if self.depth >= MAX_NESTING {
            return Err(Error::syntactic(self.peek()?.clone(), "Too much nesting."))
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&mut self) -> Result<&Token> {
        let line = self.line;
        self.tokens.peek().ok_or_else(|| Error::unexpected(line))
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.tokens.peek()
            .map(|t| !t.is_end_of_file() && t.kind == kind)
            .unwrap_or(false)
    }

    /// Moves past the current token and returns it. Stays put on the
    /// end-of-input token.
    fn advance(&mut self) -> Result<Token> {
        if self.peek()?.is_end_of_file() {
            return self.peek().map(Token::clone)
        }
        let token = self.tokens.next().ok_or_else(|| Error::unexpected(self.line))?;
        self.line = token.line;
        Ok(token)
    }

    fn consume(&mut self, kind: TokenKind, error_msg: &str) -> Result<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(Error::syntactic(self.peek()?.clone(), error_msg))
        }
    }

    fn match_binary_precedence_with_tokens(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<Expr>,
        kinds: &[TokenKind]
    ) -> Result<Expr> {
        let mut e = parse(self)?;

        while let Some(token) = self.match_any(kinds) {
            trace!("line {}: binary {:?}", token.line, token.kind);
            let right = Box::new(parse(self)?);
            e = Expr::new_binary(Box::new(e), token, right)
        }

        Ok(e)
    }

    fn match_single(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance().ok()
        } else {
            None
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|k| self.match_single(*k))
    }
}

fn literal_text(token: Token) -> String {
    token.literal.unwrap_or(token.lexeme)
}
