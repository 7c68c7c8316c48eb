//! Integration tests for fatal Error types
//!
//! Tests error construction, display, locations, and error kinds.

use descent_foundation::{Error, ErrorKind, Location, ParseLimit};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_syntax() {
    let err = Error::syntax("expected ')'");
    assert!(matches!(err.kind, ErrorKind::Syntax(_)));
    assert!(err.location.is_none());
    assert_eq!(format!("{err}"), "expected ')'");
}

#[test]
fn error_undefined_rule() {
    let err = Error::undefined_rule("statement");
    assert!(matches!(err.kind, ErrorKind::UndefinedRule(_)));
    assert!(format!("{err}").contains("statement"));
}

#[test]
fn error_no_progress() {
    let err = Error::no_progress("empty");
    assert!(matches!(err.kind, ErrorKind::NoProgress(_)));
    assert!(format!("{err}").contains("empty"));
}

#[test]
fn error_input_exhausted() {
    let err = Error::input_exhausted();
    assert_eq!(err.kind, ErrorKind::InputExhausted);
    assert!(format!("{err}").contains("end of input"));
}

#[test]
fn error_lexical() {
    let err = Error::lexical("unexpected character: $");
    assert!(matches!(err.kind, ErrorKind::Lexical(_)));
    assert_eq!(format!("{err}"), "lexical error: unexpected character: $");
}

#[test]
fn error_custom() {
    let err = Error::custom("semicolon required");
    assert_eq!(err.kind, ErrorKind::Custom("semicolon required".into()));
    assert_eq!(format!("{err}"), "semicolon required");
}

#[test]
fn error_limit_exceeded() {
    let err = Error::limit_exceeded(ParseLimit::MaxDepth {
        limit: 8,
        rule: None,
    });
    let msg = format!("{err}");
    assert!(msg.contains("limit exceeded"));
    assert!(msg.contains('8'));
    assert!(!msg.contains("in rule"));
}

// =============================================================================
// No-match Diagnostic
// =============================================================================

#[test]
fn no_rule_matched_lists_rules_failures_and_token() {
    let err = Error::no_rule_matched(
        vec!["value".into(), "statement".into()],
        vec![
            "expected rule value: token mismatch".into(),
            "expected rule statement: not enough tokens".into(),
        ],
        "Sym('+')".into(),
    );

    let msg = format!("{err}");
    assert!(msg.starts_with("failed to parse, expected:\n"));
    assert!(msg.contains("  value\n  statement\n"));
    assert!(msg.contains("expected rule value: token mismatch\n"));
    assert!(msg.contains("expected rule statement: not enough tokens\n"));
    assert!(msg.ends_with("but instead got Sym('+')"));
}

#[test]
fn no_rule_matched_keeps_structure() {
    let err = Error::no_rule_matched(vec!["a".into()], Vec::new(), "end of input".into());
    match err.kind {
        ErrorKind::NoRuleMatched {
            rules,
            failures,
            found,
        } => {
            assert_eq!(rules, vec!["a"]);
            assert!(failures.is_empty());
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

// =============================================================================
// Locations
// =============================================================================

#[test]
fn error_location_prefix() {
    let err = Error::syntax("missing operand").with_location(Location::new("calc", 4, 9));
    assert_eq!(format!("{err}"), "at calc:4:9: missing operand");
}

#[test]
fn optional_location_attaches_when_present() {
    let err = Error::custom("x").with_optional_location(Some(Location::new("f", 1, 1)));
    assert_eq!(err.location, Some(Location::new("f", 1, 1)));

    let err = Error::custom("x").with_optional_location(None);
    assert!(err.location.is_none());
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::syntax("x"));
}
