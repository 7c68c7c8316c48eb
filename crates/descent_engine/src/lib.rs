//! Ordered-choice, backtracking recursive-descent parsing engine.
//!
//! Grammar authors register named rules in a [`Grammar`]. Each rule is a
//! scanner that consumes tokens from a [`Cursor`] and yields a node or fails.
//! The engine drives rule application with automatic rollback:
//!
//! - [`Cursor::expect`] / [`Cursor::expect_or_fatal`] - single-token expectation
//! - [`Cursor::apply_rule`] / [`Cursor::apply_rule_or_fatal`] - rule application
//! - [`Cursor::apply_helper`] / [`Cursor::apply_helper_or_fatal`] - labelled helpers yielding non-node values
//! - [`Cursor::try_rule`] - optional elements
//! - [`Cursor::first_of`] / [`Cursor::first_of_or_fatal`] - ordered choice
//! - [`Cursor::this_or_if`] - right-recursive operator folding
//! - [`Parser::parse`] - the top-level drive loop
//!
//! Tokens and nodes are opaque to the engine. There is no memoization and
//! no left-recursion elimination: a left-recursive rule recurses until the
//! stack is exhausted, or until [`ParserConfig::with_max_depth`] stops it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod cursor;
pub mod grammar;
pub mod parser;

pub use config::{FatalErrorConstructor, LocationResolver, ParserConfig};
pub use cursor::{Cursor, Snapshot};
pub use descent_foundation::{
    Error, ErrorKind, Failure, Location, ParseLimit, Recoverable, RecoverableKind, Result,
};
pub use grammar::{Grammar, Rule, RuleId, Scanner};
pub use parser::Parser;
