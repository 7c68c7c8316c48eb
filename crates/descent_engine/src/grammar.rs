//! Rule table with late-bound rule handles.
//!
//! Rules are referenced through [`RuleId`]s, indices into the table that are
//! resolved each time a rule is applied. A rule can therefore be declared
//! first and defined later, which is how mutually recursive rules refer to
//! each other:
//!
//! ```ignore
//! let mut grammar = Grammar::new();
//! let sum = grammar.declare("sum");
//! let product = grammar.rule("product", move |c| { /* may apply `sum` */ });
//! grammar.define(sum, move |c| { /* applies `product` */ });
//! grammar.register(sum);
//! ```

use std::fmt;

use descent_foundation::{Error, Result};

use crate::cursor::Cursor;

/// A rule body: consumes tokens from the cursor and yields a node, or fails.
pub type Scanner<T, N> = Box<dyn Fn(&mut Cursor<'_, T, N>) -> Result<N>>;

/// Handle to a rule in a [`Grammar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    /// Returns the index of this rule in its grammar.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named, possibly recursive rule.
pub struct Rule<T, N> {
    label: String,
    scanner: Option<Scanner<T, N>>,
}

impl<T, N> Rule<T, N> {
    /// Returns the rule's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if the rule has a scanner.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.scanner.is_some()
    }
}

impl<T, N> fmt::Debug for Rule<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// The rules of a grammar, plus the ordered list of drive-loop targets.
///
/// Registration order is the drive loop's priority: at each position the
/// first registered rule that matches wins. Two registered rules that match
/// the same prefix therefore resolve silently in favor of the earlier one.
pub struct Grammar<T, N> {
    rules: Vec<Rule<T, N>>,
    targets: Vec<RuleId>,
}

impl<T, N> Default for Grammar<T, N> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            targets: Vec::new(),
        }
    }
}

impl<T, N> Grammar<T, N> {
    /// Creates an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a rule without a body.
    ///
    /// Applying it before [`define`](Self::define) is a fatal error.
    pub fn declare(&mut self, label: impl Into<String>) -> RuleId {
        let id = RuleId(self.rules.len());
        self.rules.push(Rule {
            label: label.into(),
            scanner: None,
        });
        id
    }

    /// Sets the body of a declared rule, replacing any previous body.
    ///
    /// Ids from another grammar are ignored.
    pub fn define<F>(&mut self, id: RuleId, scanner: F)
    where
        F: Fn(&mut Cursor<'_, T, N>) -> Result<N> + 'static,
    {
        if let Some(rule) = self.rules.get_mut(id.0) {
            rule.scanner = Some(Box::new(scanner));
        }
    }

    /// Declares and defines a rule in one step.
    pub fn rule<F>(&mut self, label: impl Into<String>, scanner: F) -> RuleId
    where
        F: Fn(&mut Cursor<'_, T, N>) -> Result<N> + 'static,
    {
        let id = self.declare(label);
        self.define(id, scanner);
        id
    }

    /// Adds a rule to the drive loop's targets.
    pub fn register(&mut self, id: RuleId) {
        self.targets.push(id);
    }

    /// Defines a rule and registers it as a drive-loop target.
    pub fn add_rule<F>(&mut self, label: impl Into<String>, scanner: F) -> RuleId
    where
        F: Fn(&mut Cursor<'_, T, N>) -> Result<N> + 'static,
    {
        let id = self.rule(label, scanner);
        self.register(id);
        id
    }

    /// Returns the label of a rule.
    #[must_use]
    pub fn label(&self, id: RuleId) -> &str {
        self.rules.get(id.0).map_or("<unknown>", Rule::label)
    }

    /// Returns the rule behind a handle.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule<T, N>> {
        self.rules.get(id.0)
    }

    /// Returns the drive-loop targets in registration order.
    #[must_use]
    pub fn targets(&self) -> &[RuleId] {
        &self.targets
    }

    /// Returns the labels of the drive-loop targets in registration order.
    #[must_use]
    pub fn target_labels(&self) -> Vec<String> {
        self.targets
            .iter()
            .map(|&id| self.label(id).to_string())
            .collect()
    }

    /// Returns the number of rules, registered or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves a handle to its label and scanner.
    pub(crate) fn resolve(&self, id: RuleId) -> std::result::Result<(&str, &Scanner<T, N>), Error> {
        let rule = self
            .rules
            .get(id.0)
            .ok_or_else(|| Error::undefined_rule(format!("#{}", id.0)))?;
        let scanner = rule
            .scanner
            .as_ref()
            .ok_or_else(|| Error::undefined_rule(rule.label.clone()))?;
        Ok((rule.label.as_str(), scanner))
    }
}

impl<T, N> fmt::Debug for Grammar<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rules)
            .field("targets", &self.targets)
            .finish()
    }
}
