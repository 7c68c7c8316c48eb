//! Token types for arithmetic expressions.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this token is the given operator.
    #[must_use]
    pub fn is_operator(&self, op: char) -> bool {
        self.kind == TokenKind::Operator(op)
    }

    /// Returns true if this token is a number literal.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.kind, TokenKind::Number(_))
    }
}

/// Token types for arithmetic expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Number literal like `42` or `2.5`
    Number(f64),
    /// Binary operator, `+` or `*`
    Operator(char),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Lexer error
    Error(String),
}
