//! Core error model and source locations for descent.
//!
//! This crate provides:
//! - [`Failure`] - The two-tier outcome of a failed parse step (recoverable or fatal)
//! - [`Recoverable`] - Backtrackable failures caught by the nearest rollback boundary
//! - [`Error`] - Fatal errors that abort an entire parse
//! - [`Location`] - A resolved `(source, line, column)` position

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod location;

pub use error::{Error, ErrorKind, Failure, ParseLimit, Recoverable, RecoverableKind, Result};
pub use location::Location;
