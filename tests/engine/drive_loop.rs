//! Integration tests for the top-level drive loop

use descent_engine::{Error, ErrorKind, Grammar, Location, Parser, ParserConfig};

use crate::support::{Tok, is_num, num, sym, value};

fn statements() -> Grammar<Tok, i64> {
    let mut grammar = Grammar::new();
    grammar.add_rule("number", |c| c.expect(is_num).map(value));
    grammar.add_rule("negation", |c| {
        c.expect(|t| *t == sym('-'))?;
        let n = c.expect_or_fatal("expected number after '-'", is_num)?;
        Ok(-value(n))
    });
    grammar
}

// =============================================================================
// Success
// =============================================================================

#[test]
fn parse_empty_input() {
    let parser = Parser::new(statements());
    assert!(parser.parse(&[]).unwrap().is_empty());
}

#[test]
fn parse_collects_nodes_in_order() {
    let parser = Parser::new(statements());
    let tokens = [num(1), sym('-'), num(2), num(3)];
    assert_eq!(parser.parse(&tokens).unwrap(), vec![1, -2, 3]);
}

#[test]
fn parser_is_reusable() {
    let parser = Parser::new(statements());
    assert_eq!(parser.parse(&[num(4)]).unwrap(), vec![4]);
    assert_eq!(parser.parse(&[sym('-'), num(4)]).unwrap(), vec![-4]);
}

#[test]
fn first_registered_rule_wins() {
    let mut grammar: Grammar<Tok, i64> = Grammar::new();
    grammar.add_rule("first", |c| c.consume().map(|_| 1));
    grammar.add_rule("second", |c| c.consume().map(|_| 2));
    let parser = Parser::new(grammar);
    assert_eq!(parser.parse(&[sym('a'), sym('b')]).unwrap(), vec![1, 1]);
}

// =============================================================================
// Failure
// =============================================================================

#[test]
fn no_match_lists_every_registered_rule() {
    let parser = Parser::new(statements());
    let err = parser.parse(&[num(1), sym('?')]).unwrap_err();

    match &err.kind {
        ErrorKind::NoRuleMatched {
            rules,
            failures,
            found,
        } => {
            assert_eq!(rules, &vec!["number".to_string(), "negation".to_string()]);
            assert_eq!(failures.len(), 2);
            assert_eq!(found, "Sym('?')");
        }
        other => panic!("unexpected kind: {other:?}"),
    }

    let msg = err.to_string();
    assert!(msg.contains("  number\n"));
    assert!(msg.contains("  negation\n"));
    assert!(msg.ends_with("but instead got Sym('?')"));
}

#[test]
fn fatal_error_aborts_parse_unchanged() {
    let parser = Parser::new(statements());
    let err = parser.parse(&[num(1), sym('-'), sym('-')]).unwrap_err();
    assert_eq!(err, Error::syntax("expected number after '-'"));
}

#[test]
fn rule_without_progress_is_an_error() {
    let mut grammar: Grammar<Tok, i64> = Grammar::new();
    grammar.add_rule("empty", |_| Ok(0));
    let parser = Parser::new(grammar);
    let err = parser.parse(&[num(1)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoProgress("empty".into()));
}

#[test]
fn undefined_target_is_an_error() {
    let mut grammar: Grammar<Tok, i64> = Grammar::new();
    let later = grammar.declare("later");
    grammar.register(later);
    let parser = Parser::new(grammar);
    assert!(parser.parse(&[]).unwrap().is_empty());
    let err = parser.parse(&[num(1)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedRule("later".into()));
}

// =============================================================================
// Configuration
// =============================================================================

/// Numbers sit at the column equal to their value; symbols at column 99.
fn column_config() -> ParserConfig<Tok> {
    ParserConfig::new().with_location_resolver(|t: &Tok| match t {
        Tok::Num(n) => Location::new("input", 1, u32::try_from(*n).unwrap_or(0)),
        Tok::Sym(_) => Location::new("input", 1, 99),
    })
}

#[test]
fn fatal_errors_are_located() {
    let parser = Parser::with_config(statements(), column_config());
    let err = parser.parse(&[sym('-'), sym('+')]).unwrap_err();
    assert_eq!(err.location, Some(Location::new("input", 1, 99)));
    assert_eq!(err.to_string(), "at input:1:99: expected number after '-'");
}

#[test]
fn no_match_is_located_at_offending_token() {
    let parser = Parser::with_config(statements(), column_config());
    let err = parser.parse(&[num(3), sym('?')]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoRuleMatched { .. }));
    assert_eq!(err.location, Some(Location::new("input", 1, 99)));
}

#[test]
fn custom_fatal_constructor_shapes_errors() {
    let config = ParserConfig::new().with_fatal_error(|message, token: Option<&Tok>| {
        Error::custom(format!("{message} [{token:?}]"))
    });
    let parser = Parser::with_config(statements(), config);

    let err = parser.parse(&[sym('-'), sym('-')]).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::Custom("expected number after '-' [Some(Sym('-'))]".into())
    );

    let err = parser.parse(&[sym('?')]).unwrap_err();
    match err.kind {
        ErrorKind::Custom(message) => {
            assert!(message.starts_with("failed to parse, expected:\n"));
            assert!(message.ends_with("[Some(Sym('?'))]"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}
