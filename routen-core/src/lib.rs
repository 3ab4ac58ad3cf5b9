//! # routen-core
//!
//! Core dispatch engine for the Routen request router.
//!
//! This crate has a minimal dependency surface and is designed to be imported
//! by adapters and extensions that don't need the full `routen-std` builder.
//!
//! # Dispatch Model
//!
//! Routen processes a request in three stages, each owned by one module:
//!
//! ## Stage 1: Matching ([`PathPattern`])
//!
//! A route pattern string compiles once into a reusable matcher. Given a
//! request path it produces a [`Params`] map or `None`; no-match is a plain
//! control-flow value, never an error.
//!
//! ## Stage 2: The Walk ([`Context`])
//!
//! Per request, the router assembles an ordered candidate list (middleware
//! routes first, then routes for the exact method, then fallback routes) and
//! hands it to a [`Context`]. [`Context::next`] advances a monotonic cursor
//! over that list: skipping non-matching routes, replacing `params` on every
//! match, and running the matched route's handler chain in order.
//!
//! ## Stage 3: Handlers ([`Handler`])
//!
//! A handler receives the request and the shared context and resolves to a
//! [`Flow`]: respond (short-circuiting the walk), continue to the next
//! handler, or stage an overridable response. Calling [`Context::next`] from
//! inside a handler resumes the *same* walk, which is what makes a handler a
//! middleware.
//!
//! # Error Types
//!
//! - [`PatternError`] - Pattern compilation errors
//! - [`HandlerFault`] - A handler error or panic, tagged with the site it
//!   occurred at
//! - [`BoxError`] - Boxed error alias used at handler boundaries

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod flow;
mod handler;
mod message;
mod method;
mod params;
mod pattern;
mod route;

// Re-exports
pub use context::Context;
pub use error::{BoxError, HandlerFault, HandlerPanic, PatternError};
pub use flow::Flow;
pub use handler::{Chain, DynHandler, Handler, HandlerOutput, IntoChain};
pub use message::{Request, Response, internal_error, not_found, text};
pub use method::RouteKind;
pub use params::Params;
pub use pattern::{PathPattern, PatternSet};
pub use route::Route;
