//! Route bucket tags.

use http::Method;
use std::fmt;

/// Which bucket a route is registered in.
///
/// Candidate routes are evaluated per request in bucket order (middleware
/// routes, then routes for the request's exact method, then fallback
/// routes), preserving registration order inside each bucket.
///
/// [`Method`] covers both the standard verbs and arbitrary custom tokens
/// (`PURGE`, `REPORT`, ...), so there is no open string space to probe at
/// dispatch time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Runs for every request method, before any method-specific route.
    Middleware,
    /// Runs only for requests with this exact method.
    Method(Method),
    /// Runs for every request method, after all method-specific routes.
    Any,
}

impl RouteKind {
    /// Whether a request with `method` may be routed to this bucket.
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            RouteKind::Middleware | RouteKind::Any => true,
            RouteKind::Method(m) => m == method,
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Middleware => f.write_str("middleware"),
            RouteKind::Method(m) => write!(f, "{m}"),
            RouteKind::Any => f.write_str("any"),
        }
    }
}
