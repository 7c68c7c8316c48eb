//! Descent - Backtracking recursive-descent parsing
//!
//! This crate re-exports all layers of the descent workspace for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: descent_arith      - Arithmetic lexer, grammar, and evaluator
//! Layer 1: descent_engine     - Cursor, rule combinators, drive loop
//! Layer 0: descent_foundation - Failure model, errors, locations
//! ```

pub use descent_arith as arith;
pub use descent_engine as engine;
pub use descent_foundation as foundation;
