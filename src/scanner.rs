use crate::{
    error::{Error, Reporter, Result},
    token::{self, Token, TokenKind},
};
use log::{debug, trace};
use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;

/// Turns source text into tokens. Iterating yields one item per token or
/// lexical error; [`Scanner::scan_tokens`] is the usual entry point.
pub struct Scanner<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    line: usize,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.src.peek()?;

            let line = self.line;
            let kind = self.next_token_kind();
            let lexeme = std::mem::take(&mut self.lexeme_buffer);

            if let Some(kind) = kind {
                return Some(kind.map(|kind| {
                    let literal = literal_for(kind, &lexeme);
                    trace!("line {}: {:?} {:?}", line, kind, lexeme);
                    Token { kind, lexeme, literal, line }
                }))
            }
        }
    }
}

impl <'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            line: 1,
        }
    }

    /// Scans the whole source. Lexical errors go to `reporter` and the
    /// offending input is skipped, so the result always ends with an
    /// end-of-input token.
    pub fn scan_tokens<R: Reporter + ?Sized>(mut self, reporter: &mut R) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut errors = 0;
        for result in self.by_ref() {
            match result {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    errors += 1;
                    reporter.report(&e);
                },
            }
        }
        tokens.push(Token::end_of_file(self.line));
        debug!("scanned {} tokens over {} lines, {} errors", tokens.len(), self.line, errors);
        tokens
    }

    fn next_token_kind(&mut self) -> Option<Result<TokenKind>> {
        let next_char = self.src.next()?;
        self.lexeme_buffer.push(next_char);

        use TokenKind::*;
        match next_char {
            '(' => Some(Ok(LeftParen)),
            ')' => Some(Ok(RightParen)),
            '{' => Some(Ok(LeftBrace)),
            '}' => Some(Ok(RightBrace)),
            ',' => Some(Ok(Comma)),
            '.' => Some(Ok(Dot)),
            '-' => Some(Ok(Minus)),
            '+' => Some(Ok(Plus)),
            ';' => Some(Ok(Semicolon)),
            '*' => Some(Ok(Star)),
            '!' => Some(Ok(if self.does_next_match('=') { BangEqual } else { Bang })),
            '=' => Some(Ok(if self.does_next_match('=') { EqualEqual } else { Equal })),
            '<' => Some(Ok(if self.does_next_match('=') { LessEqual } else { Less })),
            '>' => Some(Ok(if self.does_next_match('=') { GreaterEqual } else { Greater })),
            '/' => {
                if self.does_next_match('/') { // is this a comment?
                    self.advance_until_match('\n');
                    None
                } else {
                    Some(Ok(Slash))
                }
            },
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            },
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => Some(Ok(self.extract_number())),
            c if can_start_identifier(&c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::lexical(self.line, format!("Unexpected character: {}", c)))),
        }
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.src.peek() {
            Some(next) if c == *next => {
                self.lexeme_buffer.push(c);
                self.src.next();
                true
            }
            _ => false,
        }
    }

    fn extract_string(&mut self) -> Result<TokenKind> {
        let mut newline_count = 0;
        self.advance_until_match_for_each('"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;
        match self.src.next() {
            None => Err(Error::lexical(self.line, "Unterminated string.")),
            Some(q) => { // q here must be " due to advance_until
                self.lexeme_buffer.push(q);
                Ok(TokenKind::String)
            },
        }
    }

    fn extract_number(&mut self) -> TokenKind {
        self.advance_until(|n| !n.is_ascii_digit());

        let has_fraction = self.src.peek() == Some(&'.')
            && self.src.peek_nth(1).map_or(false, |c| c.is_ascii_digit());
        if has_fraction {
            self.lexeme_buffer.push('.');
            self.src.next();
            self.advance_until(|n| !n.is_ascii_digit());
        }

        TokenKind::Number
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        token::keyword(self.lexeme_buffer.as_str()).unwrap_or(TokenKind::Identifier)
    }

    fn advance_until_match(&mut self, c: char) {
        self.advance_until(|n| n == &c)
    }

    fn advance_until(&mut self, should_stop: impl Fn(&char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_match_for_each(
        &mut self,
        c: char,
        f: impl FnMut(char),
    ) {
        self.advance_until_for_each(|n| n == &c, f);
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(&char) -> bool,
        mut f: impl FnMut(char),
    ) {
        while let Some(next) = self.src.peek() {
            if should_stop(next) { break }
            let next = *next;
            self.src.next();
            self.lexeme_buffer.push(next);
            f(next);
        }
    }
}

fn literal_for(kind: TokenKind, lexeme: &str) -> Option<String> {
    match kind {
        TokenKind::String => lexeme
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(str::to_string),
        TokenKind::Number | TokenKind::Identifier => Some(lexeme.to_string()),
        _ => None,
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
