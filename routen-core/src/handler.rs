//! Request handlers and handler chains.
//!
//! A handler is the unit of work a route dispatches to. It receives the
//! request and the per-request [`Context`] and resolves to a [`Flow`]:
//! respond, continue, or stage an overridable response. A handler that wants
//! pass-through (middleware) semantics awaits [`Context::next`] and may
//! inspect or transform the response before returning it.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn` for static dispatch. Route chains
//! store handlers behind [`DynHandler`], the object-safe twin; any `Handler`
//! is a `DynHandler` through the blanket impl.

use crate::context::Context;
use crate::error::BoxError;
use crate::flow::Flow;
use crate::message::Request;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// What a handler invocation resolves to.
///
/// The `Err` arm is the handler "throwing": it aborts the walk and is
/// converted to a response by the configured error interceptor.
pub type HandlerOutput = Result<Flow, BoxError>;

/// A unit of request-processing work.
///
/// Implement this directly for stateful handlers, or use a closure: any
/// `Fn(Arc<Request>, Arc<Context>)` returning a future of [`HandlerOutput`]
/// is a handler.
///
/// ```rust,ignore
/// router.get("/hello/:name", |_req, ctx: Arc<Context>| async move {
///     let name = ctx.param("name").unwrap_or_default();
///     Ok(Flow::Respond(text(StatusCode::OK, name)))
/// });
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Process the request.
    ///
    /// `ctx.next()` is the shared continuation of the request's walk;
    /// calling it resumes the walk rather than starting a nested one.
    fn call(
        &self,
        request: Arc<Request>,
        context: Arc<Context>,
    ) -> impl Future<Output = HandlerOutput> + Send;
}

/// Object-safe version of [`Handler`] for storage in route chains.
pub trait DynHandler: Send + Sync + 'static {
    /// Process the request (dynamic dispatch version).
    fn call_dyn<'a>(
        &'a self,
        request: Arc<Request>,
        context: Arc<Context>,
    ) -> BoxFuture<'a, HandlerOutput>;
}

// Blanket implementation: any Handler is a DynHandler.
impl<T: Handler> DynHandler for T {
    fn call_dyn<'a>(
        &'a self,
        request: Arc<Request>,
        context: Arc<Context>,
    ) -> BoxFuture<'a, HandlerOutput> {
        Box::pin(self.call(request, context))
    }
}

// Allow Box<dyn DynHandler> to be used where Handler is expected.
impl Handler for Box<dyn DynHandler> {
    fn call(
        &self,
        request: Arc<Request>,
        context: Arc<Context>,
    ) -> impl Future<Output = HandlerOutput> + Send {
        self.as_ref().call_dyn(request, context)
    }
}

// Blanket impl for closures.
impl<F, Fut> Handler for F
where
    F: Fn(Arc<Request>, Arc<Context>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerOutput> + Send + 'static,
{
    fn call(
        &self,
        request: Arc<Request>,
        context: Arc<Context>,
    ) -> impl Future<Output = HandlerOutput> + Send {
        (self)(request, context)
    }
}

/// An explicit multi-handler chain for a single route registration.
///
/// Handlers run in insertion order; the first [`Flow::Respond`] wins and
/// short-circuits the rest of the chain.
///
/// ```rust,ignore
/// router.get("/users/:id", Chain::new(authorize).then(load_user));
/// ```
pub struct Chain {
    handlers: Vec<Arc<dyn DynHandler>>,
}

impl Chain {
    /// Start a chain with its first handler.
    pub fn new(handler: impl Handler) -> Self {
        Self {
            handlers: vec![Arc::new(handler)],
        }
    }

    /// Append a handler to the chain.
    pub fn then(mut self, handler: impl Handler) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain is empty (never true for a built `Chain`).
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Conversion into the handler list a route stores.
///
/// Implemented by single handlers and by [`Chain`], so a registration call
/// accepts either.
pub trait IntoChain {
    /// Consume into an ordered handler list.
    fn into_chain(self) -> Vec<Arc<dyn DynHandler>>;
}

impl IntoChain for Chain {
    fn into_chain(self) -> Vec<Arc<dyn DynHandler>> {
        self.handlers
    }
}

impl<H: Handler> IntoChain for H {
    fn into_chain(self) -> Vec<Arc<dyn DynHandler>> {
        vec![Arc::new(self)]
    }
}
