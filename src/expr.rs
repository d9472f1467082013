use std::fmt::{self, Display};

use astgen::generate_ast;

use crate::token::Token;

generate_ast!(
    Expr,
    [
        Binary   => { left: Box<Expr>, op: Token, right: Box<Expr> };
        Grouping => { expression: Box<Expr> };
        Literal  => { value: LiteralValue };
        Unary    => { op: Token, right: Box<Expr> };
    ]
);

/// Value of a literal node. Numbers keep their source text; turning
/// them into numeric values is left to whoever evaluates the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Bool(bool),
    Nil,
    Number(String),
    String(String),
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LiteralValue::*;
        match self {
            Bool(b) => write!(f, "{}", b),
            Nil => write!(f, "nil"),
            Number(n) => write!(f, "{}", n),
            String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    struct Depth;

    impl Visitor<usize> for Depth {
        fn visit_binary_expr(&mut self, e: &Binary) -> usize {
            1 + e.left.accept(self).max(e.right.accept(self))
        }

        fn visit_grouping_expr(&mut self, e: &Grouping) -> usize {
            1 + e.expression.accept(self)
        }

        fn visit_literal_expr(&mut self, _e: &Literal) -> usize {
            1
        }

        fn visit_unary_expr(&mut self, e: &Unary) -> usize {
            1 + e.right.accept(self)
        }
    }

    #[test]
    fn literal_values_print_canonical_text() {
        assert_eq!("nil", LiteralValue::Nil.to_string());
        assert_eq!("true", LiteralValue::from(true).to_string());
        assert_eq!("12.50", LiteralValue::Number("12.50".into()).to_string());
        assert_eq!("abc", LiteralValue::String("abc".into()).to_string());
    }

    #[test]
    fn accept_walks_every_variant() {
        let minus = Token::new(TokenKind::Minus, "-", 1);
        let e = Expr::new_binary(
            Box::new(Expr::new_literal(LiteralValue::Nil)),
            Token::new(TokenKind::EqualEqual, "==", 1),
            Box::new(Expr::new_grouping(Box::new(Expr::new_unary(
                minus,
                Box::new(Expr::new_literal(LiteralValue::Number("1".into()))),
            )))),
        );
        assert_eq!(4, e.accept(&mut Depth));
    }
}
