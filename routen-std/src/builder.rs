//! Route table construction.
//!
//! Registration is fluent and infallible; pattern compilation and table
//! freezing happen in [`RouterBuilder::build`], so every configuration
//! fault surfaces before the router serves its first request.

use crate::error::BuildError;
use crate::intercept::{ErrorInterceptor, TraceInterceptor};
use crate::router::Router;
use crate::seed::ContextSeed;
use http::{Extensions, Method};
use routen_core::{BoxError, DynHandler, IntoChain, PatternSet, Request, Route, RouteKind};
use std::future::Future;
use std::sync::Arc;

/// One registration, held raw until `build` compiles its pattern.
struct RouteEntry {
    kind: RouteKind,
    pattern: String,
    handlers: Vec<Arc<dyn DynHandler>>,
}

/// An append-only, ordered route table under construction, plus router
/// configuration.
///
/// Insertion order is match priority within each bucket. Routes are never
/// mutated or removed once registered.
///
/// ```rust,ignore
/// let mut builder = Router::builder();
/// builder
///     .middleware("/**", log_requests)
///     .get("/hello/:name", hello)
///     .all("/**", fallback);
/// let router = builder.build()?;
/// ```
pub struct RouterBuilder {
    entries: Vec<RouteEntry>,
    seed: ContextSeed,
    interceptor: Arc<dyn ErrorInterceptor>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    /// Create an empty builder with the default configuration
    /// ([`TraceInterceptor`], empty context).
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            seed: ContextSeed::default(),
            interceptor: Arc::new(TraceInterceptor::new()),
        }
    }

    fn push(&mut self, kind: RouteKind, pattern: String, chain: impl IntoChain) -> &mut Self {
        self.entries.push(RouteEntry {
            kind,
            pattern,
            handlers: chain.into_chain(),
        });
        self
    }

    /// Register a route for an explicit method, standard or custom verb.
    pub fn method(&mut self, verb: Method, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Method(verb), path.to_owned(), chain)
    }

    /// Register a `GET` route.
    pub fn get(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::GET, path, chain)
    }

    /// Register a `HEAD` route.
    pub fn head(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::HEAD, path, chain)
    }

    /// Register a `POST` route.
    pub fn post(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::POST, path, chain)
    }

    /// Register a `PUT` route.
    pub fn put(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::PUT, path, chain)
    }

    /// Register a `DELETE` route.
    pub fn delete(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::DELETE, path, chain)
    }

    /// Register an `OPTIONS` route.
    pub fn options(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::OPTIONS, path, chain)
    }

    /// Register a `PATCH` route.
    pub fn patch(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::PATCH, path, chain)
    }

    /// Register a fallback route: evaluated for every method, after all
    /// method-specific routes.
    pub fn all(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Any, path.to_owned(), chain)
    }

    /// Register a middleware route: evaluated for every method, before any
    /// method-specific route.
    pub fn middleware(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Middleware, path.to_owned(), chain)
    }

    /// A registration view that prefixes every path with `prefix`, writing
    /// into the same table. Scopes nest; prefixes concatenate.
    pub fn scope(&mut self, prefix: &str) -> Scope<'_> {
        Scope {
            builder: self,
            prefix: prefix.to_owned(),
        }
    }

    /// Replace the error interceptor.
    pub fn on_error(&mut self, interceptor: impl ErrorInterceptor) -> &mut Self {
        self.interceptor = Arc::new(interceptor);
        self
    }

    /// Seed every request's context with a clone of `extensions`.
    pub fn context(&mut self, extensions: Extensions) -> &mut Self {
        self.seed = ContextSeed::Value(extensions);
        self
    }

    /// Seed every request's context by running an async factory. A factory
    /// failure surfaces from `dispatch` as a configuration fault before any
    /// route is evaluated.
    pub fn context_with<F, Fut>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(Arc<Request>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Extensions, BoxError>> + Send + 'static,
    {
        self.seed = ContextSeed::factory(factory);
        self
    }

    /// Compile every pattern and freeze the table into a [`Router`].
    ///
    /// Patterns are compiled through a per-table cache, so two routes
    /// registered with the same string share one matcher instance.
    pub fn build(self) -> Result<Router, BuildError> {
        let mut patterns = PatternSet::new();
        let mut routes = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            let pattern =
                patterns
                    .compile(&entry.pattern)
                    .map_err(|source| BuildError::Pattern {
                        pattern: entry.pattern.clone(),
                        source,
                    })?;
            routes.push(Arc::new(Route::new(entry.kind, pattern, entry.handlers)));
        }
        Ok(Router::new(routes.into(), self.seed, self.interceptor))
    }
}

/// A prefix-bound registration view over a [`RouterBuilder`].
///
/// Every route registered through a scope lands in the parent's table with
/// the scope's prefix prepended to its path.
pub struct Scope<'a> {
    builder: &'a mut RouterBuilder,
    prefix: String,
}

impl Scope<'_> {
    fn push(&mut self, kind: RouteKind, path: &str, chain: impl IntoChain) -> &mut Self {
        let pattern = format!("{}{}", self.prefix, path);
        self.builder.push(kind, pattern, chain);
        self
    }

    /// Register a route for an explicit method under this prefix.
    pub fn method(&mut self, verb: Method, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Method(verb), path, chain)
    }

    /// Register a `GET` route under this prefix.
    pub fn get(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::GET, path, chain)
    }

    /// Register a `HEAD` route under this prefix.
    pub fn head(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::HEAD, path, chain)
    }

    /// Register a `POST` route under this prefix.
    pub fn post(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::POST, path, chain)
    }

    /// Register a `PUT` route under this prefix.
    pub fn put(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::PUT, path, chain)
    }

    /// Register a `DELETE` route under this prefix.
    pub fn delete(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::DELETE, path, chain)
    }

    /// Register an `OPTIONS` route under this prefix.
    pub fn options(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::OPTIONS, path, chain)
    }

    /// Register a `PATCH` route under this prefix.
    pub fn patch(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.method(Method::PATCH, path, chain)
    }

    /// Register a fallback route under this prefix.
    pub fn all(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Any, path, chain)
    }

    /// Register a middleware route under this prefix.
    pub fn middleware(&mut self, path: &str, chain: impl IntoChain) -> &mut Self {
        self.push(RouteKind::Middleware, path, chain)
    }

    /// A nested scope; the prefixes concatenate.
    pub fn scope(&mut self, prefix: &str) -> Scope<'_> {
        Scope {
            builder: &mut *self.builder,
            prefix: format!("{}{}", self.prefix, prefix),
        }
    }
}
