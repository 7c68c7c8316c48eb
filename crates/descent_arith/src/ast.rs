//! Expression tree produced by the arithmetic grammar.

use std::fmt;

use crate::span::Span;

/// An arithmetic expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Number literal like `42`
    Number(f64, Span),
    /// Parenthesized expression like `(1 + 2)`
    Grouping(Box<Expr>, Span),
    /// Sum like `1 + 2`
    Add(Box<Expr>, Box<Expr>),
    /// Product like `2 * 3`
    Mul(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a sum node.
    #[must_use]
    pub fn add(left: Self, right: Self) -> Self {
        Self::Add(Box::new(left), Box::new(right))
    }

    /// Creates a product node.
    #[must_use]
    pub fn mul(left: Self, right: Self) -> Self {
        Self::Mul(Box::new(left), Box::new(right))
    }

    /// Returns the source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Number(_, s) | Self::Grouping(_, s) => *s,
            Self::Add(l, r) | Self::Mul(l, r) => l.span().to(r.span()),
        }
    }

    /// Returns the literal value if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Evaluates the expression.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        match self {
            Self::Number(n, _) => *n,
            Self::Grouping(inner, _) => inner.evaluate(),
            Self::Add(l, r) => l.evaluate() + r.evaluate(),
            Self::Mul(l, r) => l.evaluate() * r.evaluate(),
        }
    }
}

/// Renders with explicit parentheses around every binary operation.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n, _) => write!(f, "{n}"),
            Self::Grouping(inner, _) => write!(f, "{inner}"),
            Self::Add(l, r) => write!(f, "({l} + {r})"),
            Self::Mul(l, r) => write!(f, "({l} * {r})"),
        }
    }
}
