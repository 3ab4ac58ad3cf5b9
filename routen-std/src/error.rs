//! Errors raised outside the walk: building the table and seeding the
//! context. Both are configuration faults, distinguishable from handler
//! errors so embedding code can branch on fault origin.

use routen_core::{BoxError, PatternError};
use thiserror::Error;

/// Errors from freezing a [`RouterBuilder`](crate::RouterBuilder) into a
/// [`Router`](crate::Router).
#[derive(Error, Debug)]
pub enum BuildError {
    /// A registered route pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern string as registered.
        pattern: String,
        /// The compilation failure.
        #[source]
        source: PatternError,
    },
}

/// Configuration faults surfaced by `dispatch` before any route runs.
///
/// This is the only way `dispatch` returns `Err`; everything downstream of
/// a resolved context yields a `Response`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured context factory failed for this request.
    #[error("context seed factory failed: {0}")]
    Seed(#[source] BoxError),
}
