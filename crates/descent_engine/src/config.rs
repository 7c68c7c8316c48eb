//! Constructor-time configuration for a [`Parser`](crate::Parser).

use std::fmt;

use descent_foundation::{Error, Location};

/// Maps a token to the position it was lexed from.
pub type LocationResolver<T> = Box<dyn Fn(&T) -> Location>;

/// Builds a fatal error from a message and the token at the failure point.
///
/// The token is `None` when the failure happened at the end of input.
pub type FatalErrorConstructor<T> = Box<dyn Fn(String, Option<&T>) -> Error>;

/// Configuration for a parser.
///
/// Every setting is optional. Without a location resolver, diagnostics carry
/// no position. Without a fatal error constructor, fatal failures become
/// plain [`Error`]s carrying the message.
pub struct ParserConfig<T> {
    /// Resolves tokens to source positions for diagnostics.
    location_resolver: Option<LocationResolver<T>>,

    /// Replaces the default fatal error construction.
    fatal_error: Option<FatalErrorConstructor<T>>,

    /// Maximum rule nesting depth (None = bounded only by the call stack).
    max_depth: Option<usize>,
}

impl<T> Default for ParserConfig<T> {
    fn default() -> Self {
        Self {
            location_resolver: None,
            fatal_error: None,
            max_depth: None,
        }
    }
}

impl<T> ParserConfig<T> {
    /// Creates a configuration with every setting off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the location resolver.
    #[must_use]
    pub fn with_location_resolver(mut self, resolver: impl Fn(&T) -> Location + 'static) -> Self {
        self.location_resolver = Some(Box::new(resolver));
        self
    }

    /// Builder method to set the fatal error constructor.
    #[must_use]
    pub fn with_fatal_error(
        mut self,
        constructor: impl Fn(String, Option<&T>) -> Error + 'static,
    ) -> Self {
        self.fatal_error = Some(Box::new(constructor));
        self
    }

    /// Builder method to limit rule nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Returns the configured depth limit.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns true if a location resolver is configured.
    #[must_use]
    pub fn has_location_resolver(&self) -> bool {
        self.location_resolver.is_some()
    }

    /// Returns true if a custom fatal error constructor is configured.
    #[must_use]
    pub fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    /// Resolves a token's location, if a resolver is configured.
    #[must_use]
    pub fn resolve(&self, token: &T) -> Option<Location> {
        self.location_resolver.as_ref().map(|resolve| resolve(token))
    }

    /// Builds a fatal error for a failure at `token`.
    ///
    /// Errors left without a location by the constructor are annotated with
    /// the token's resolved position.
    #[must_use]
    pub fn fatal_error(&self, message: String, token: Option<&T>) -> Error {
        let err = match &self.fatal_error {
            Some(construct) => construct(message, token),
            None => Error::syntax(message),
        };
        if err.location.is_some() {
            return err;
        }
        err.with_optional_location(token.and_then(|t| self.resolve(t)))
    }
}

impl<T> fmt::Debug for ParserConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("location_resolver", &self.location_resolver.is_some())
            .field("fatal_error", &self.fatal_error.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
