//! The frozen router and its dispatch entry point.

use crate::builder::RouterBuilder;
use crate::error::ConfigError;
use crate::intercept::ErrorInterceptor;
use crate::seed::ContextSeed;
use http::Method;
use routen_core::{Context, Request, Response, Route, RouteKind, internal_error};
use std::sync::Arc;

/// An immutable request router: the frozen route table plus its
/// construction-time configuration.
///
/// All registration happens before `Router` exists, so the table, compiled
/// patterns, and configuration are shared read-only across concurrent
/// requests with no locking.
pub struct Router {
    routes: Arc<[Arc<Route>]>,
    seed: ContextSeed,
    interceptor: Arc<dyn ErrorInterceptor>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Start building a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub(crate) fn new(
        routes: Arc<[Arc<Route>]>,
        seed: ContextSeed,
        interceptor: Arc<dyn ErrorInterceptor>,
    ) -> Self {
        Self {
            routes,
            seed,
            interceptor,
        }
    }

    /// Read-only view of the registered routes, in table order.
    pub fn routes(&self) -> impl Iterator<Item = RouteInfo<'_>> {
        self.routes.iter().map(|route| RouteInfo {
            kind: route.kind(),
            pattern: route.pattern().source(),
            handlers: route.handlers().len(),
        })
    }

    /// Dispatch one request, resolving to exactly one response.
    ///
    /// The `Err` arm is reachable only by a failing context factory, before
    /// any route is evaluated; every downstream outcome (a handler
    /// response, the terminal 404, or an intercepted handler fault) is an
    /// `Ok` response.
    pub async fn dispatch(&self, request: Request) -> Result<Response, ConfigError> {
        let request = Arc::new(request);
        let extensions = self.seed.resolve(&request).await?;

        let pending = self.pending_for(request.method());
        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            candidates = pending.len(),
            "dispatching request"
        );

        let context = Arc::new(Context::new(
            Arc::clone(&request),
            extensions,
            pending,
        ));
        let response = match context.next().await {
            Ok(response) => response,
            Err(fault) => self
                .interceptor
                .intercept(&fault, &request, &context)
                .unwrap_or_else(internal_error),
        };
        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            status = response.status().as_u16(),
            "request dispatched"
        );
        Ok(response)
    }

    /// The freshly computed candidate list for a request: middleware
    /// routes, then routes for the exact method, then fallback routes,
    /// registration order inside each bucket.
    fn pending_for(&self, method: &Method) -> Vec<Arc<Route>> {
        let buckets: [fn(&RouteKind) -> bool; 3] = [
            |kind| matches!(kind, RouteKind::Middleware),
            |kind| matches!(kind, RouteKind::Method(_)),
            |kind| matches!(kind, RouteKind::Any),
        ];
        let mut pending = Vec::new();
        for bucket in buckets {
            pending.extend(
                self.routes
                    .iter()
                    .filter(|route| bucket(route.kind()) && route.kind().accepts(method))
                    .cloned(),
            );
        }
        pending
    }
}

/// One row of the router's read-only introspection view.
#[derive(Clone, Copy, Debug)]
pub struct RouteInfo<'a> {
    /// The route's bucket.
    pub kind: &'a RouteKind,
    /// The pattern string as registered.
    pub pattern: &'a str,
    /// Number of handlers in the route's chain.
    pub handlers: usize,
}
