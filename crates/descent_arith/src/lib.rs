//! Arithmetic expressions on top of the descent parsing engine.
//!
//! This crate is a complete, small client of the engine:
//! - [`Lexer`] - Tokenization of source text into spanned [`Token`]s
//! - [`grammar()`] - The arithmetic grammar (`+`, `*`, parentheses)
//! - [`Expr`] - The expression tree, with [`Expr::evaluate`]
//! - [`parse_source`] / [`evaluate_source`] - Source text to results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod span;
pub mod token;

pub use ast::Expr;
pub use grammar::{MAX_DEPTH, MAX_GROUP_NESTING, grammar, parser};
pub use lexer::Lexer;
pub use span::Span;
pub use token::{Token, TokenKind};

use descent_foundation::Error;
use log::debug;

/// Parses every expression in `source`.
///
/// Diagnostics are located as `source_name:line:column`.
///
/// # Errors
/// Returns an error if the source contains malformed tokens or expressions.
pub fn parse_source(source_name: &str, source: &str) -> Result<Vec<Expr>, Error> {
    let tokens = Lexer::tokenize_all(source);
    debug!("lexed {} tokens from {source_name}", tokens.len());
    parser(source_name).parse(&tokens)
}

/// Parses and evaluates every expression in `source`.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn evaluate_source(source_name: &str, source: &str) -> Result<Vec<f64>, Error> {
    let exprs = parse_source(source_name, source)?;
    Ok(exprs.iter().map(Expr::evaluate).collect())
}
