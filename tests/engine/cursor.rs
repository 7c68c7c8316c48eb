//! Integration tests for cursor primitives and single-token expectation

use descent_engine::{ErrorKind, Failure, Grammar, Recoverable, RecoverableKind};

use crate::support::{Tok, is_num, num, sym, value, with_cursor};

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn peek_does_not_consume() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [num(1), sym('+')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        assert_eq!(c.peek(), Some(&num(1)));
        assert_eq!(c.peek(), Some(&num(1)));
        assert_eq!(c.position(), 0);
        assert_eq!(c.remaining().len(), 2);
    });
}

#[test]
fn consume_advances_one_token() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [num(1), sym('+')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        assert_eq!(c.consume().unwrap(), &num(1));
        assert_eq!(c.consume().unwrap(), &sym('+'));
        assert!(!c.has_items());
        assert!(c.remaining().is_empty());
    });
}

#[test]
fn consume_past_end_is_fatal() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let ((), _) = with_cursor(&[], &grammar, |c| {
        let err = c.consume().unwrap_err().into_fatal().unwrap();
        assert_eq!(err.kind, ErrorKind::InputExhausted);
    });
}

#[test]
fn does_next_is_false_at_end() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [sym('*')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        assert!(c.does_next(|t| *t == sym('*')));
        assert!(!c.does_next(is_num));
        c.consume().unwrap();
        assert!(!c.does_next(|_| true));
    });
}

// =============================================================================
// Expectation
// =============================================================================

#[test]
fn expect_mismatch_leaves_position() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [sym('(')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        let err = c.expect(is_num).unwrap_err();
        assert!(matches!(
            err,
            Failure::Recoverable(Recoverable {
                kind: RecoverableKind::Mismatch,
                ..
            })
        ));
        assert_eq!(c.position(), 0);
    });
}

#[test]
fn expect_at_end_is_exhausted() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let ((), _) = with_cursor(&[], &grammar, |c| {
        let err = c.expect(|_| true).unwrap_err();
        assert_eq!(err.to_string(), "not enough tokens");
        assert!(err.is_recoverable());
    });
}

#[test]
fn expect_or_fatal_uses_message() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [sym(';')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        assert_eq!(c.expect_or_fatal("unused", |t| *t == sym(';')).unwrap(), &sym(';'));
        let err = c.expect_or_fatal("expected ')'", is_num).unwrap_err();
        let err = err.into_fatal().unwrap();
        assert_eq!(err.kind, ErrorKind::Syntax("expected ')'".into()));
    });
}

// =============================================================================
// this_or_if
// =============================================================================

#[test]
fn this_or_if_returns_default_without_match() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [num(4)];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        let v = c
            .this_or_if(7, |t| *t == sym('+'), |_, _, _| panic!("transform ran"))
            .unwrap();
        assert_eq!(v, 7);
        assert_eq!(c.position(), 0);
    });
}

#[test]
fn this_or_if_returns_default_at_end() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let ((), _) = with_cursor(&[], &grammar, |c| {
        let v = c.this_or_if(7, |_| true, |_, _, _| Ok(0)).unwrap();
        assert_eq!(v, 7);
    });
}

#[test]
fn this_or_if_folds_matched_token() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [sym('+'), num(5)];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        let v = c
            .this_or_if(
                10,
                |t| *t == sym('+'),
                |c, left, op| {
                    assert_eq!(op, &sym('+'));
                    let right = c.expect(is_num)?;
                    Ok(left + value(right))
                },
            )
            .unwrap();
        assert_eq!(v, 15);
        assert!(!c.has_items());
    });
}

#[test]
fn this_or_if_propagates_transform_failure() {
    let grammar: Grammar<Tok, i64> = Grammar::new();
    let tokens = [sym('+')];
    let ((), _) = with_cursor(&tokens, &grammar, |c| {
        let err = c
            .this_or_if(1, |_| true, |c, _, _| c.expect(is_num).map(|_| 0))
            .unwrap_err();
        assert!(err.is_recoverable());
    });
}
