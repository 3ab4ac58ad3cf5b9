//! Error types for Routen.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`PatternError`] - Route pattern compilation errors
//! - [`HandlerFault`] - A handler error or panic, tagged with its site
//! - [`HandlerPanic`] - The payload of a caught handler panic
//!
//! Note what is *not* here: an unmatched route. No-match is a control-flow
//! value (`None` from the matcher, the terminal 404 from the walk), never an
//! error.

use crate::method::RouteKind;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while compiling a route pattern.
#[derive(Error, Debug)]
pub enum PatternError {
    /// A capture segment has a missing or malformed parameter name.
    #[error("invalid parameter name in segment `{0}`")]
    InvalidName(String),

    /// An inline regex group is missing its closing parenthesis.
    #[error("unbalanced `(` in segment `{0}`")]
    UnbalancedParen(String),

    /// Characters follow a capture where only a modifier may appear.
    #[error("unexpected trailing characters in segment `{0}`")]
    TrailingChars(String),

    /// The translated pattern failed to compile as a regex.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// The payload of a handler panic, recovered at the invocation boundary.
#[derive(Error, Debug)]
#[error("handler panicked: {0}")]
pub struct HandlerPanic(pub String);

/// A handler error or panic, tagged with the site it occurred at.
///
/// The fault is created at the failing invocation and then propagates out of
/// every in-flight `next()` call as an `Err`, aborting the rest of the walk.
/// A fault that passes back through an upstream handler's `?` is never
/// re-wrapped, so the error interceptor always sees the original site.
#[derive(Error, Debug)]
#[error("handler {index} of {kind} route `{pattern}` failed: {source}")]
pub struct HandlerFault {
    pattern: Box<str>,
    kind: RouteKind,
    index: usize,
    #[source]
    source: BoxError,
}

impl HandlerFault {
    /// Tag `error` with a site, unless it already is a propagated fault.
    pub fn wrap(error: BoxError, pattern: &str, kind: &RouteKind, index: usize) -> Self {
        match error.downcast::<HandlerFault>() {
            Ok(fault) => *fault,
            Err(source) => Self {
                pattern: pattern.into(),
                kind: kind.clone(),
                index,
                source,
            },
        }
    }

    /// The pattern of the route whose handler failed.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The bucket of the route whose handler failed.
    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    /// Position of the failing handler within its route's chain.
    pub fn handler_index(&self) -> usize {
        self.index
    }

    /// The underlying handler error.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_wrap_preserves_original_site() {
        let fault = HandlerFault::wrap(
            "boom".into(),
            "/a/:id",
            &RouteKind::Method(Method::GET),
            1,
        );
        // Re-wrapping at an upstream site keeps the inner fault untouched.
        let rewrapped =
            HandlerFault::wrap(Box::new(fault), "/**", &RouteKind::Middleware, 0);

        assert_eq!(rewrapped.pattern(), "/a/:id");
        assert_eq!(rewrapped.handler_index(), 1);
        assert_eq!(rewrapped.cause().to_string(), "boom");
    }

    #[test]
    fn test_fault_display_names_site() {
        let fault = HandlerFault::wrap("nope".into(), "/x", &RouteKind::Any, 0);
        assert_eq!(fault.to_string(), "handler 0 of any route `/x` failed: nope");
    }
}
