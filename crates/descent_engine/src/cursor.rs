//! The parse cursor: token position, output, and the rollback protocol.
//!
//! Every rule attempt records a [`Snapshot`] of `(token position, output
//! length)` before running, and runs the rule's scanner on a child cursor
//! that shares the same token slice and output vector. A rule attempt ends in
//! exactly one of three states:
//!
//! - **Accepted**: the parent advances to the child's position and the node
//!   is appended to the parent's output.
//! - **Rolled back**: a recoverable failure restores the snapshot and is
//!   re-raised with the rule's label.
//! - **Aborted**: a fatal failure propagates without restoring. Only the
//!   `*_or_fatal` combinators touch it, prefixing their own message.
//!
//! Labelled helpers ([`Cursor::apply_helper`]) follow the same protocol for
//! scanners whose value is not a node; their value is never appended.
//!
//! Output is append-only and addressed by length, so rollback is a
//! truncation. Nodes that nested attempts append inside a scanner are scratch
//! for that scanner ([`Cursor::produced`]) and are discarded when its attempt
//! finishes; only the scanner's returned node reaches the parent.

use descent_foundation::{Error, Failure, Location, ParseLimit, Recoverable, Result};
use log::{debug, trace};

use crate::config::ParserConfig;
use crate::grammar::{Grammar, RuleId};

/// A saved cursor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    position: usize,
    output_len: usize,
}

impl Snapshot {
    /// Index of the next token to be consumed.
    #[must_use]
    pub const fn position(self) -> usize {
        self.position
    }

    /// Length of the output sequence.
    #[must_use]
    pub const fn output_len(self) -> usize {
        self.output_len
    }
}

/// A view over the remaining tokens and the output of one rule attempt.
pub struct Cursor<'p, T, N> {
    tokens: &'p [T],
    position: usize,
    output: &'p mut Vec<N>,
    /// Output length when this view was created; nodes past it are scratch.
    base: usize,
    depth: usize,
    grammar: &'p Grammar<T, N>,
    config: &'p ParserConfig<T>,
}

// =============================================================================
// Cursor primitives
// =============================================================================

impl<'p, T, N> Cursor<'p, T, N> {
    /// Creates a top-level cursor at the start of `tokens`.
    pub fn new(
        tokens: &'p [T],
        output: &'p mut Vec<N>,
        grammar: &'p Grammar<T, N>,
        config: &'p ParserConfig<T>,
    ) -> Self {
        let base = output.len();
        Self {
            tokens,
            position: 0,
            output,
            base,
            depth: 0,
            grammar,
            config,
        }
    }

    /// Creates a child view for one rule attempt.
    fn child(&mut self) -> Cursor<'_, T, N> {
        Cursor {
            tokens: self.tokens,
            position: self.position,
            base: self.output.len(),
            output: &mut *self.output,
            depth: self.depth + 1,
            grammar: self.grammar,
            config: self.config,
        }
    }

    /// Returns the index of the next token.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the rule nesting depth of this view.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the tokens not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'p [T] {
        self.tokens.get(self.position..).unwrap_or_default()
    }

    /// Returns the grammar this cursor applies rules from.
    #[must_use]
    pub fn grammar(&self) -> &'p Grammar<T, N> {
        self.grammar
    }

    /// Returns the nodes committed by nested rules during this attempt.
    #[must_use]
    pub fn produced(&self) -> &[N] {
        self.output.get(self.base..).unwrap_or_default()
    }

    /// Records the current `(position, output length)`.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            output_len: self.output.len(),
        }
    }

    /// Restores a snapshot taken on this cursor.
    fn restore(&mut self, snapshot: Snapshot) {
        self.position = snapshot.position;
        self.output.truncate(snapshot.output_len);
    }

    /// Returns true if a token remains.
    #[must_use]
    pub fn has_items(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'p T> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the next token.
    ///
    /// Only call this when a token is known to exist.
    ///
    /// # Errors
    /// Returns a fatal [`InputExhausted`](descent_foundation::ErrorKind::InputExhausted)
    /// error if no token remains.
    pub fn consume(&mut self) -> Result<&'p T> {
        let token = self.peek().ok_or_else(Error::input_exhausted)?;
        self.position += 1;
        Ok(token)
    }

    /// Tests the next token without consuming it. False at end of input.
    pub fn does_next(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        self.peek().is_some_and(predicate)
    }

    /// Resolves the position of the next token, if possible.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.peek().and_then(|token| self.config.resolve(token))
    }

    /// Builds a fatal failure at the next token via the configured constructor.
    #[must_use]
    pub fn fatal(&self, message: impl Into<String>) -> Failure {
        Failure::Fatal(self.config.fatal_error(message.into(), self.peek()))
    }

    // =========================================================================
    // Single-token expectation
    // =========================================================================

    /// Consumes the next token if it satisfies `predicate`.
    ///
    /// # Errors
    /// Recoverable `Exhausted` at end of input, recoverable `Mismatch` if the
    /// token does not satisfy the predicate.
    pub fn expect(&mut self, predicate: impl FnOnce(&T) -> bool) -> Result<&'p T> {
        let token = self.peek().ok_or_else(Failure::exhausted)?;
        if !predicate(token) {
            return Err(Failure::mismatch());
        }
        self.position += 1;
        Ok(token)
    }

    /// Like [`expect`](Self::expect), for branches the grammar has committed to.
    ///
    /// # Errors
    /// Returns a fatal error built from `message` at the current token.
    pub fn expect_or_fatal(
        &mut self,
        message: impl Into<String>,
        predicate: impl FnOnce(&T) -> bool,
    ) -> Result<&'p T> {
        match self.expect(predicate) {
            Ok(token) => Ok(token),
            Err(_) => Err(self.fatal(message)),
        }
    }

    /// Consumes the next token and folds it into `default` with `transform`
    /// if it satisfies `predicate`; otherwise returns `default` without
    /// consuming anything.
    ///
    /// This expresses right-recursive operator chains: parse one operand,
    /// then optionally fold in an operator and a recursive application. The
    /// transform receives the operand by value, so it can be moved into the
    /// folded node.
    ///
    /// # Errors
    /// Propagates whatever `transform` returns.
    pub fn this_or_if<V>(
        &mut self,
        default: V,
        predicate: impl FnOnce(&T) -> bool,
        transform: impl FnOnce(&mut Self, V, &'p T) -> Result<V>,
    ) -> Result<V> {
        let Some(token) = self.peek() else {
            return Ok(default);
        };
        if !predicate(token) {
            return Ok(default);
        }
        self.position += 1;
        transform(self, default, token)
    }

    /// Runs `f` speculatively. A recoverable failure rolls back and yields
    /// `None`; fatal failures propagate.
    ///
    /// # Errors
    /// Propagates fatal failures from `f`.
    pub fn speculate<V>(&mut self, f: impl FnOnce(&mut Self) -> Result<V>) -> Result<Option<V>> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(Failure::Recoverable(_)) => {
                self.restore(snapshot);
                Ok(None)
            }
            Err(fatal @ Failure::Fatal(_)) => Err(fatal),
        }
    }

    // =========================================================================
    // Labelled attempts
    // =========================================================================

    /// Applies a labelled helper: a scanner that yields some value other than
    /// a node. It runs under the same rollback protocol as a rule, but its
    /// value is returned to the caller and never appended to the output.
    ///
    /// # Errors
    /// A recoverable failure, labelled `expected rule <label>: ...`, after
    /// restoring position and output. Fatal failures propagate unchanged.
    pub fn apply_helper<V>(
        &mut self,
        label: &str,
        helper: impl FnOnce(&mut Cursor<'_, T, N>) -> Result<V>,
    ) -> Result<V> {
        self.attempt_with(label, helper)
    }

    /// Applies a mandatory labelled helper.
    ///
    /// # Errors
    /// Any failure of the helper becomes a fatal failure combining `message`
    /// with the inner failure's text.
    pub fn apply_helper_or_fatal<V>(
        &mut self,
        message: impl Into<String>,
        label: &str,
        helper: impl FnOnce(&mut Cursor<'_, T, N>) -> Result<V>,
    ) -> Result<V> {
        let message = message.into();
        let result = self.attempt_with(label, helper);
        self.escalate(&message, result)
    }

    /// Turns any failure into a fatal one at the current token, prefixed
    /// with `message`.
    fn escalate<V>(&self, message: &str, result: Result<V>) -> Result<V> {
        result.map_err(|inner| self.fatal(format!("{message}\n{inner}")))
    }

    /// Runs `scan` on a child view with rollback, without appending anything.
    fn attempt_with<V>(
        &mut self,
        label: &str,
        scan: impl FnOnce(&mut Cursor<'_, T, N>) -> Result<V>,
    ) -> Result<V> {
        self.check_depth(label)?;

        let snapshot = self.snapshot();
        trace!("attempt rule {label} at token {}", snapshot.position);

        let mut child = self.child();
        let result = scan(&mut child);
        let end = child.position;

        match result {
            Ok(value) => {
                self.output.truncate(snapshot.output_len);
                self.position = end;
                trace!("accept rule {label}: tokens {}..{end}", snapshot.position);
                Ok(value)
            }
            Err(Failure::Recoverable(inner)) => {
                self.restore(snapshot);
                trace!("roll back rule {label} to token {}", snapshot.position);
                let location = self.location();
                Err(Recoverable::rule_failed(label, &inner, location.as_ref()).into())
            }
            Err(fatal @ Failure::Fatal(_)) => {
                debug!("abort in rule {label} at token {end}");
                Err(fatal)
            }
        }
    }

    fn check_depth(&self, label: &str) -> Result<()> {
        match self.config.max_depth() {
            Some(limit) if self.depth >= limit => {
                let limit = ParseLimit::MaxDepth {
                    limit,
                    rule: Some(label.to_string()),
                };
                let err = Error::limit_exceeded(limit).with_optional_location(self.location());
                Err(err.into())
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Rule application
// =============================================================================

impl<T, N: Clone> Cursor<'_, T, N> {
    /// Runs a rule's scanner on a child view, without appending its node.
    fn attempt(&mut self, id: RuleId) -> Result<N> {
        let grammar = self.grammar;
        let (label, scanner) = grammar.resolve(id)?;
        self.attempt_with(label, |child| scanner(child))
    }

    /// Applies a rule with rollback. On success the node is appended to this
    /// cursor's output and returned.
    ///
    /// # Errors
    /// A recoverable failure, labelled `expected rule <label>: ...`, after
    /// restoring position and output. Fatal failures propagate unchanged.
    pub fn apply_rule(&mut self, id: RuleId) -> Result<N> {
        let node = self.attempt(id)?;
        self.output.push(node.clone());
        Ok(node)
    }

    /// Applies a mandatory rule.
    ///
    /// Any failure inside the rule, recoverable or fatal, is rebuilt as a
    /// fatal failure at the current token whose message is `message`
    /// followed by the inner failure's text.
    ///
    /// # Errors
    /// Returns a fatal failure if the rule does not match.
    pub fn apply_rule_or_fatal(&mut self, message: impl Into<String>, id: RuleId) -> Result<N> {
        let message = message.into();
        let result = self.attempt(id);
        let node = self.escalate(&message, result)?;
        self.output.push(node.clone());
        Ok(node)
    }

    /// Applies an optional rule. A recoverable failure yields `None` with no
    /// side effects.
    ///
    /// # Errors
    /// Propagates fatal failures.
    pub fn try_rule(&mut self, id: RuleId) -> Result<Option<N>> {
        match self.apply_rule(id) {
            Ok(node) => Ok(Some(node)),
            Err(Failure::Recoverable(_)) => Ok(None),
            Err(fatal) => Err(fatal),
        }
    }

    /// Ordered choice: returns the first rule that matches.
    ///
    /// # Errors
    /// A recoverable `NoneMatched` failure if every rule fails recoverably.
    /// A fatal failure from any attempt stops the search and propagates.
    pub fn first_of(&mut self, ids: &[RuleId]) -> Result<N> {
        let failures = match self.try_each(ids)? {
            Ok(node) => return Ok(node),
            Err(failures) => failures,
        };
        let labels: Vec<&str> = ids.iter().map(|&id| self.grammar.label(id)).collect();
        Err(Recoverable::none_matched(&labels, &failures).into())
    }

    /// Ordered choice where some alternative is mandatory.
    ///
    /// # Errors
    /// A fatal failure aggregating `message` and every attempt's message if
    /// no rule matches.
    pub fn first_of_or_fatal(&mut self, message: impl Into<String>, ids: &[RuleId]) -> Result<N> {
        let failures = match self.try_each(ids)? {
            Ok(node) => return Ok(node),
            Err(failures) => failures,
        };
        let mut message = message.into();
        for failure in failures {
            message.push('\n');
            message.push_str(&failure);
        }
        Err(self.fatal(message))
    }

    /// Tries rules in order, returning the first node or every failure message.
    fn try_each(&mut self, ids: &[RuleId]) -> Result<std::result::Result<N, Vec<String>>> {
        let mut failures = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.apply_rule(id) {
                Ok(node) => return Ok(Ok(node)),
                Err(Failure::Recoverable(failure)) => failures.push(failure.message),
                Err(fatal) => return Err(fatal),
            }
        }
        Ok(Err(failures))
    }

    /// Positive lookahead: reports whether a rule would match here, without
    /// consuming tokens or producing output.
    ///
    /// # Errors
    /// Propagates fatal failures.
    pub fn peek_rule(&mut self, id: RuleId) -> Result<bool> {
        let snapshot = self.snapshot();
        match self.attempt(id) {
            Ok(_) => {
                self.restore(snapshot);
                Ok(true)
            }
            Err(Failure::Recoverable(_)) => Ok(false),
            Err(fatal) => Err(fatal),
        }
    }

    /// Applies a rule zero or more times, stopping at the first recoverable
    /// failure or at a match that consumed nothing.
    ///
    /// # Errors
    /// Propagates fatal failures.
    pub fn repeat(&mut self, id: RuleId) -> Result<Vec<N>> {
        let mut nodes = Vec::new();
        loop {
            let before = self.position;
            match self.try_rule(id)? {
                Some(node) => {
                    nodes.push(node);
                    if self.position == before {
                        break;
                    }
                }
                None => break,
            }
        }
        Ok(nodes)
    }
}
