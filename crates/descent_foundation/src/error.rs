//! Error types for the descent parsing engine.
//!
//! Uses `thiserror` for ergonomic error definition. Parse failures come in two
//! tiers, distinguished by variant rather than by message:
//!
//! - [`Recoverable`] failures roll the cursor back to the nearest enclosing
//!   rule boundary, where an alternative may be tried.
//! - Fatal [`Error`]s are never caught by the rollback machinery. They unwind
//!   to the top-level `parse()` call unchanged.

use std::fmt;

use thiserror::Error;

use crate::location::Location;

/// Result type for grammar code. Defaults to [`Failure`] as the error.
pub type Result<T, E = Failure> = std::result::Result<T, E>;

/// The outcome of a failed parse step.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Failure {
    /// Backtrackable failure; the nearest rule boundary restores its snapshot.
    #[error(transparent)]
    Recoverable(#[from] Recoverable),
    /// Non-recoverable failure; aborts the whole parse.
    #[error(transparent)]
    Fatal(#[from] Error),
}

impl Failure {
    /// Creates a recoverable "ran out of tokens" failure.
    #[must_use]
    pub fn exhausted() -> Self {
        Self::Recoverable(Recoverable::exhausted())
    }

    /// Creates a recoverable "token did not match" failure.
    #[must_use]
    pub fn mismatch() -> Self {
        Self::Recoverable(Recoverable::mismatch())
    }

    /// Returns true if this failure can be backtracked over.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable(_))
    }

    /// Returns true if this failure aborts the parse.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Returns the fatal error, if this is one.
    #[must_use]
    pub fn into_fatal(self) -> Option<Error> {
        match self {
            Self::Fatal(err) => Some(err),
            Self::Recoverable(_) => None,
        }
    }
}

// =============================================================================
// Recoverable failures
// =============================================================================

/// Categorized kinds of recoverable failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecoverableKind {
    /// No token remained where one was expected.
    Exhausted,
    /// The next token did not satisfy the predicate.
    Mismatch,
    /// Every alternative of an ordered choice failed.
    NoneMatched,
    /// A rule's scanner failed and its attempt was rolled back.
    RuleFailed,
}

/// A failure that triggers rollback and may be retried with another rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Recoverable {
    /// What went wrong.
    pub kind: RecoverableKind,
    /// Human-readable description, including nested rule context.
    pub message: String,
}

impl Recoverable {
    /// Creates a new recoverable failure.
    #[must_use]
    pub fn new(kind: RecoverableKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an exhausted-input failure.
    #[must_use]
    pub fn exhausted() -> Self {
        Self::new(RecoverableKind::Exhausted, "not enough tokens")
    }

    /// Creates a token mismatch failure.
    #[must_use]
    pub fn mismatch() -> Self {
        Self::new(RecoverableKind::Mismatch, "token mismatch")
    }

    /// Creates a failure for an ordered choice where no alternative matched.
    #[must_use]
    pub fn none_matched(labels: &[&str], failures: &[String]) -> Self {
        let mut message = format!("none of [{}] matched", labels.join(", "));
        for failure in failures {
            message.push('\n');
            message.push_str(failure);
        }
        Self::new(RecoverableKind::NoneMatched, message)
    }

    /// Wraps an inner failure with the label of the rule that was rolled back.
    ///
    /// When `location` is given, the message is prefixed with it.
    #[must_use]
    pub fn rule_failed(label: &str, inner: &Recoverable, location: Option<&Location>) -> Self {
        let mut message = format!("expected rule {label}: {}", inner.message);
        if let Some(loc) = location {
            message = format!("at {loc}: {message}");
        }
        Self::new(RecoverableKind::RuleFailed, message)
    }
}

// =============================================================================
// Fatal errors
// =============================================================================

/// A fatal parse error.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{}{kind}", location_prefix(.location))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Where the error occurred, when a location resolver was configured.
    pub location: Option<Location>,
}

fn location_prefix(location: &Option<Location>) -> String {
    location
        .as_ref()
        .map_or_else(String::new, |loc| format!("at {loc}: "))
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Attaches a resolved location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches a location if one is available.
    #[must_use]
    pub fn with_optional_location(mut self, location: Option<Location>) -> Self {
        if location.is_some() {
            self.location = location;
        }
        self
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax(message.into()))
    }

    /// Creates the drive-loop diagnostic for a position where no rule matched.
    #[must_use]
    pub fn no_rule_matched(rules: Vec<String>, failures: Vec<String>, found: String) -> Self {
        Self::new(ErrorKind::NoRuleMatched {
            rules,
            failures,
            found,
        })
    }

    /// Creates an undefined rule error.
    #[must_use]
    pub fn undefined_rule(label: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedRule(label.into()))
    }

    /// Creates an error for a drive-loop rule that made no progress.
    #[must_use]
    pub fn no_progress(label: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoProgress(label.into()))
    }

    /// Creates an error for consuming past the end of input.
    #[must_use]
    pub fn input_exhausted() -> Self {
        Self::new(ErrorKind::InputExhausted)
    }

    /// Creates a limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: ParseLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates a lexical error reported by a token producer.
    #[must_use]
    pub fn lexical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical(message.into()))
    }

    /// Creates a caller-defined fatal error.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(message.into()))
    }
}

/// Categorized fatal error kinds for pattern matching.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    /// A committed grammar branch could not continue.
    #[error("{0}")]
    Syntax(String),

    /// No registered rule matched at some position of the drive loop.
    #[error("{}", render_no_match(.rules, .failures, .found))]
    NoRuleMatched {
        /// Labels of every registered rule, in registration order.
        rules: Vec<String>,
        /// Recoverable failure messages collected during the failed round.
        failures: Vec<String>,
        /// Rendering of the offending token.
        found: String,
    },

    /// A forward-declared rule was applied before it was defined.
    #[error("rule {0} was declared but never defined")]
    UndefinedRule(String),

    /// A drive-loop rule matched without consuming any token.
    #[error("rule {0} matched without consuming input")]
    NoProgress(String),

    /// A token was consumed with none remaining.
    #[error("consumed past the end of input")]
    InputExhausted,

    /// A configured limit was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(ParseLimit),

    /// The token producer reported malformed input.
    #[error("lexical error: {0}")]
    Lexical(String),

    /// Raised directly by grammar code.
    #[error("{0}")]
    Custom(String),
}

fn render_no_match(rules: &[String], failures: &[String], found: &str) -> String {
    let mut message = String::from("failed to parse, expected:\n");
    for rule in rules {
        message.push_str("  ");
        message.push_str(rule);
        message.push('\n');
    }
    for failure in failures {
        message.push_str(failure);
        message.push('\n');
    }
    message.push_str("but instead got ");
    message.push_str(found);
    message
}

/// Limits that abort a parse when exceeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseLimit {
    /// Maximum rule nesting depth exceeded.
    MaxDepth {
        /// The configured limit.
        limit: usize,
        /// The rule whose attempt crossed the limit.
        rule: Option<String>,
    },
}

impl fmt::Display for ParseLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepth { limit, rule } => {
                write!(f, "max rule depth ({limit}) exceeded")?;
                if let Some(rule) = rule {
                    write!(f, " in rule {rule}")?;
                }
                Ok(())
            }
        }
    }
}
