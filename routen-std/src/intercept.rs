//! Error interception.
//!
//! Every handler invocation runs under a fault boundary; a fault aborts the
//! walk and surfaces at the dispatch entry point, where the router's
//! interceptor maps it to a response. Returning `None` falls back to the
//! generic 500.

use routen_core::{Context, HandlerFault, Request, Response};

/// Maps a handler fault to the response the client receives.
///
/// The interceptor is router-construction-time configuration: set once via
/// [`RouterBuilder::on_error`](crate::RouterBuilder::on_error), read on
/// every fault, never mutated afterwards.
///
/// `intercept` must not panic; an interceptor that does is outside the
/// dispatch contract.
pub trait ErrorInterceptor: Send + Sync + 'static {
    /// Map `fault` to a response, or `None` for the generic 500.
    fn intercept(
        &self,
        fault: &HandlerFault,
        request: &Request,
        context: &Context,
    ) -> Option<Response>;
}

// Blanket impl for closures.
impl<F> ErrorInterceptor for F
where
    F: Fn(&HandlerFault, &Request, &Context) -> Option<Response> + Send + Sync + 'static,
{
    fn intercept(
        &self,
        fault: &HandlerFault,
        request: &Request,
        context: &Context,
    ) -> Option<Response> {
        (self)(fault, request, context)
    }
}

/// The default interceptor: log the fault and fall through to the 500.
///
/// Logged fields name the offending handler (route pattern, bucket, chain
/// index via the fault's display form) and the request line.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceInterceptor;

impl TraceInterceptor {
    /// Create the default interceptor.
    pub fn new() -> Self {
        Self
    }
}

impl ErrorInterceptor for TraceInterceptor {
    fn intercept(
        &self,
        fault: &HandlerFault,
        request: &Request,
        _context: &Context,
    ) -> Option<Response> {
        tracing::error!(
            error = %fault,
            method = %request.method(),
            path = request.uri().path(),
            "request handler failed"
        );
        None
    }
}
