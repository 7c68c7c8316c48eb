//! The arithmetic grammar.
//!
//! ```text
//! sum     := product ('+' sum)?
//! product := literal ('*' product)?
//! literal := number | group
//! group   := '(' sum ')'
//! ```
//!
//! Operators fold to the right, which is sound because `+` and `*` are
//! associative. Once an operator or an opening paren has been consumed the
//! grammar is committed, so a missing operand or `)` is a fatal syntax error
//! rather than a reason to backtrack.

use descent_engine::{Error, Failure, Grammar, Location, Parser, ParserConfig};

use crate::ast::Expr;
use crate::token::{Token, TokenKind};

/// Deepest parenthesis nesting an arithmetic parser accepts.
pub const MAX_GROUP_NESTING: usize = 64;

/// Rule nesting limit for arithmetic parsers.
///
/// Each group costs four rule levels (`sum`, `product`, `literal`, `group`)
/// and the innermost number three more, so the limit admits exactly
/// [`MAX_GROUP_NESTING`] groups.
pub const MAX_DEPTH: usize = 4 * MAX_GROUP_NESTING + 4;

/// Builds the arithmetic grammar with `sum` registered as the only target.
#[must_use]
pub fn grammar() -> Grammar<Token, Expr> {
    let mut grammar: Grammar<Token, Expr> = Grammar::new();
    let sum = grammar.declare("sum");
    let product = grammar.declare("product");

    let number = grammar.rule("number", |c| {
        let token = c.expect(Token::is_number)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n, token.span)),
            _ => Err(Failure::mismatch()),
        }
    });

    let group = grammar.rule("group", move |c| {
        let open = c.expect(|t| t.kind == TokenKind::LParen)?;
        let inner = c.apply_rule_or_fatal("expected expression after '('", sum)?;
        let close = c.expect_or_fatal("expected ')' to close group", |t| {
            t.kind == TokenKind::RParen
        })?;
        Ok(Expr::Grouping(Box::new(inner), open.span.to(close.span)))
    });

    let literal = grammar.rule("literal", move |c| {
        if let Some(Token {
            kind: TokenKind::Error(message),
            ..
        }) = c.peek()
        {
            let err = Error::lexical(message.clone()).with_optional_location(c.location());
            return Err(err.into());
        }
        c.first_of(&[number, group])
    });

    grammar.define(product, move |c| {
        let left = c.apply_rule(literal)?;
        c.this_or_if(left, |t| t.is_operator('*'), |c, left, _| {
            let right = c.apply_rule_or_fatal("expected operand after '*'", product)?;
            Ok(Expr::mul(left, right))
        })
    });

    grammar.define(sum, move |c| {
        let left = c.apply_rule(product)?;
        c.this_or_if(left, |t| t.is_operator('+'), |c, left, _| {
            let right = c.apply_rule_or_fatal("expected operand after '+'", sum)?;
            Ok(Expr::add(left, right))
        })
    });

    grammar.register(sum);
    grammar
}

/// Builds a parser whose diagnostics are located in `source_name`.
#[must_use]
pub fn parser(source_name: impl Into<String>) -> Parser<Token, Expr> {
    let source_name = source_name.into();
    let config = ParserConfig::new()
        .with_location_resolver(move |t: &Token| {
            Location::new(source_name.clone(), t.span.line, t.span.column)
        })
        .with_max_depth(MAX_DEPTH);
    Parser::with_config(grammar(), config)
}
