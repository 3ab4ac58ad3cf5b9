//! Per-request context and the continuation walk.
//!
//! The context is the carrier object threaded into every handler of one
//! request: the matched parameters, the user-seeded extensions, and the
//! continuation itself. [`Context::next`] resumes the walk over the
//! request's candidate routes from wherever it currently stands.
//!
//! One context exists per request, shared as `Arc<Context>` by all of its
//! handlers. The walk state (candidate list + cursor) sits behind a mutex so
//! the continuation can be re-entered from nested handler frames; execution
//! is strictly sequential, so the locks are uncontended and never held
//! across an await.

use crate::error::{HandlerFault, HandlerPanic};
use crate::flow::Flow;
use crate::handler::DynHandler;
use crate::message::{self, Request, Response};
use crate::params::Params;
use crate::route::Route;
use futures::FutureExt;
use http::Extensions;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

/// Per-request carrier: matched parameters, user extensions, and the
/// continuation over the request's candidate routes.
pub struct Context {
    request: Arc<Request>,
    extensions: Extensions,
    params: Mutex<Params>,
    walk: Mutex<Walk>,
}

/// The walk over the candidate list. The cursor is monotonic: it only
/// advances, and each position is visited at most once per request.
struct Walk {
    pending: Vec<Arc<Route>>,
    cursor: usize,
}

impl Context {
    /// Build the context for one request.
    ///
    /// `pending` is the freshly computed candidate list for this request:
    /// middleware routes, then routes for the request's method, then
    /// fallback routes, each in registration order.
    pub fn new(request: Arc<Request>, extensions: Extensions, pending: Vec<Arc<Route>>) -> Self {
        Self {
            request,
            extensions,
            params: Mutex::new(Params::new()),
            walk: Mutex::new(Walk { pending, cursor: 0 }),
        }
    }

    /// The request being dispatched.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The user-seeded extensions, read-only for the walk's duration.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Snapshot of the parameters captured by the most recently matched
    /// route. Replaced wholesale on every match.
    pub fn params(&self) -> Params {
        self.params.lock().unwrap().clone()
    }

    /// The captured value for one parameter, if present.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params.lock().unwrap().get(name).map(str::to_owned)
    }

    /// Resume the walk from its current position.
    ///
    /// Scans candidate routes until one matches, then runs its handler
    /// chain in order:
    ///
    /// - [`Flow::Respond`] returns that response immediately, skipping the
    ///   rest of the chain and all remaining routes (first response wins);
    /// - [`Flow::Continue`] moves to the next handler, or, when the chain
    ///   is exhausted, back to scanning routes;
    /// - [`Flow::Override`] stages a response for the end of the current
    ///   chain, where it is returned unless a later handler replaced it.
    ///
    /// When the candidate list is exhausted, returns the terminal 404
    /// (`Cannot <METHOD> <path>`). That is a normal return value: a
    /// middleware that called `next()` may pass it along or replace it.
    ///
    /// A handler error or panic aborts the walk: it is tagged with its site
    /// as a [`HandlerFault`] and propagates out of every in-flight `next()`
    /// frame as `Err`, normally forwarded by middleware with `?`.
    pub async fn next(self: &Arc<Self>) -> Result<Response, HandlerFault> {
        loop {
            let Some(route) = self.advance() else {
                return Ok(message::not_found(
                    self.request.method(),
                    self.request.uri().path(),
                ));
            };

            let Some(params) = route.pattern().match_path(self.request.uri().path()) else {
                // Consumes the cursor slot, invisible to handlers.
                continue;
            };
            *self.params.lock().unwrap() = params;

            let mut staged: Option<Response> = None;
            for (index, handler) in route.handlers().iter().enumerate() {
                match self.invoke(&route, index, handler).await? {
                    Flow::Continue => {}
                    Flow::Respond(response) => return Ok(response),
                    Flow::Override(slot) => staged = slot,
                }
            }
            if let Some(response) = staged {
                return Ok(response);
            }
            // Chain exhausted without a response: keep scanning.
        }
    }

    /// Take the route at the cursor and advance it. `None` at exhaustion.
    fn advance(&self) -> Option<Arc<Route>> {
        let mut walk = self.walk.lock().unwrap();
        let route = walk.pending.get(walk.cursor).cloned()?;
        walk.cursor += 1;
        Some(route)
    }

    /// Run one handler under the fault boundary: an `Err` or a panic is
    /// tagged with this invocation's site, unless it is a fault already
    /// propagating from deeper in the walk.
    async fn invoke(
        self: &Arc<Self>,
        route: &Route,
        index: usize,
        handler: &Arc<dyn DynHandler>,
    ) -> Result<Flow, HandlerFault> {
        let call = handler.call_dyn(Arc::clone(&self.request), Arc::clone(self));
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(flow)) => Ok(flow),
            Ok(Err(error)) => Err(HandlerFault::wrap(
                error,
                route.pattern().source(),
                route.kind(),
                index,
            )),
            Err(payload) => Err(HandlerFault::wrap(
                Box::new(HandlerPanic(panic_message(payload))),
                route.pattern().source(),
                route.kind(),
                index,
            )),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let walk = self.walk.lock().unwrap();
        f.debug_struct("Context")
            .field("method", self.request.method())
            .field("path", &self.request.uri().path())
            .field("pending", &walk.pending.len())
            .field("cursor", &walk.cursor)
            .finish()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_owned(),
            Err(_) => "opaque panic payload".to_owned(),
        },
    }
}
