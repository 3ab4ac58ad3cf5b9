//! Route registrations.

use crate::handler::DynHandler;
use crate::method::RouteKind;
use crate::pattern::PathPattern;
use std::fmt;
use std::sync::Arc;

/// One registration: a bucket tag, a compiled pattern, and a handler chain.
///
/// Routes are immutable after insertion; their position in the table is
/// their match priority within a bucket.
pub struct Route {
    kind: RouteKind,
    pattern: Arc<PathPattern>,
    handlers: Vec<Arc<dyn DynHandler>>,
}

impl Route {
    /// Create a route. The pattern comes pre-compiled from the table's
    /// pattern cache.
    pub fn new(
        kind: RouteKind,
        pattern: Arc<PathPattern>,
        handlers: Vec<Arc<dyn DynHandler>>,
    ) -> Self {
        Self {
            kind,
            pattern,
            handlers,
        }
    }

    /// The bucket this route was registered in.
    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    /// The route's compiled pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The handler chain, in registration order.
    pub fn handlers(&self) -> &[Arc<dyn DynHandler>] {
        &self.handlers
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.source())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
