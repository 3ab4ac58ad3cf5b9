//! # routen - Request Routing and Middleware Dispatch
//!
//! `routen` holds an ordered table of path/method routes, matches incoming
//! request paths against compiled patterns to extract named parameters, and
//! walks matched routes' handler chains under a shared continuation until a
//! response is produced.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routen::prelude::*;
//!
//! let mut builder = Router::builder();
//! builder
//!     .middleware("/**", |_req, ctx: Arc<Context>| async move {
//!         let response = ctx.next().await?;
//!         Ok(Flow::Respond(response))
//!     })
//!     .get("/hello/:name", |_req, ctx: Arc<Context>| async move {
//!         let name = ctx.param("name").unwrap_or_default();
//!         Ok(Flow::Respond(text(StatusCode::OK, name)))
//!     });
//! let router = builder.build()?;
//!
//! // Feed requests from any transport adapter:
//! let response = router.dispatch(request).await?;
//! ```
//!
//! Transports, static file serving, and body parsing stay outside: an
//! adapter constructs the [`Request`], calls [`Router::dispatch`], and
//! writes the [`Response`] back. Handlers plug those concerns in as
//! ordinary routes.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use routen_core::{
    // Handler surface
    BoxError,
    Chain,
    // Context / continuation
    Context,
    DynHandler,
    Flow,
    Handler,
    // Errors
    HandlerFault,
    HandlerOutput,
    HandlerPanic,
    IntoChain,
    Params,
    PathPattern,
    PatternError,
    PatternSet,
    // Vocabulary
    Request,
    Response,
    Route,
    RouteKind,
    internal_error,
    not_found,
    text,
};

pub use routen_std::{
    BuildError, ConfigError, ErrorInterceptor, RouteInfo, Router, RouterBuilder, Scope,
    TraceInterceptor,
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use routen_std::testing::*;
}

/// Prelude module - common imports for Routen.
///
/// # Usage
///
/// ```rust,ignore
/// use routen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Chain, Context, Flow, Handler, HandlerFault, IntoChain, Params, Request,
        Response, RouteKind, Router, RouterBuilder, text,
    };
}
