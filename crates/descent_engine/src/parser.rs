//! The drive loop.
//!
//! [`Parser::parse`] repeatedly applies the grammar's registered rules, in
//! registration order, until the tokens are exhausted. The first rule that
//! matches at a position wins. If none matches, the parse aborts with a
//! diagnostic listing every registered rule and every failure collected at
//! that position.

use std::fmt;

use descent_foundation::{Error, Failure};
use log::debug;

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::grammar::Grammar;

/// A grammar paired with its configuration, ready to parse token sequences.
pub struct Parser<T, N> {
    grammar: Grammar<T, N>,
    config: ParserConfig<T>,
}

impl<T, N> Parser<T, N> {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new(grammar: Grammar<T, N>) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    /// Creates a parser with the given configuration.
    #[must_use]
    pub fn with_config(grammar: Grammar<T, N>, config: ParserConfig<T>) -> Self {
        Self { grammar, config }
    }

    /// Returns the grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar<T, N> {
        &self.grammar
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig<T> {
        &self.config
    }
}

impl<T: fmt::Debug, N: Clone> Parser<T, N> {
    /// Parses `tokens` into the sequence of nodes committed by the registered
    /// rules, in commit order.
    ///
    /// # Errors
    /// Returns the fatal error that aborted the parse: one raised by a rule,
    /// or a `NoRuleMatched` diagnostic when no registered rule matches at
    /// some position.
    pub fn parse(&self, tokens: &[T]) -> Result<Vec<N>, Error> {
        let mut output = Vec::new();
        let mut cursor = Cursor::new(tokens, &mut output, &self.grammar, &self.config);

        while cursor.has_items() {
            let start = cursor.position();
            debug!("drive loop at token {start} of {}", tokens.len());

            let mut failures = Vec::new();
            let mut matched = None;
            for &id in self.grammar.targets() {
                match cursor.apply_rule(id) {
                    Ok(_) => {
                        matched = Some(id);
                        break;
                    }
                    Err(Failure::Recoverable(failure)) => failures.push(failure.message),
                    Err(Failure::Fatal(err)) => {
                        debug!("parse aborted: {err}");
                        return Err(err);
                    }
                }
            }

            match matched {
                Some(id) if cursor.position() == start => {
                    let label = self.grammar.label(id);
                    let err = Error::no_progress(label).with_optional_location(cursor.location());
                    return Err(err);
                }
                Some(_) => {}
                None => return Err(self.no_rule_matched(&cursor, failures)),
            }
        }

        Ok(output)
    }

    /// Builds the diagnostic for a position where no registered rule matched.
    fn no_rule_matched(&self, cursor: &Cursor<'_, T, N>, failures: Vec<String>) -> Error {
        let token = cursor.peek();
        let found = token.map_or_else(|| "end of input".to_string(), |t| format!("{t:?}"));
        let err = Error::no_rule_matched(self.grammar.target_labels(), failures, found);
        debug!("no rule matched at token {}", cursor.position());

        if self.config.has_fatal_error() {
            self.config.fatal_error(err.kind.to_string(), token)
        } else {
            err.with_optional_location(cursor.location())
        }
    }
}

impl<T, N> fmt::Debug for Parser<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("grammar", &self.grammar)
            .field("config", &self.config)
            .finish()
    }
}
