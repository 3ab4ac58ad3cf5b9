//! # routen-std
//!
//! The assembled router product for Routen.
//!
//! This crate provides:
//! - **Registration**: [`RouterBuilder`] with the fluent verb methods and
//!   prefix-bound [`Scope`]s
//! - **Dispatch**: the frozen [`Router`] and its `dispatch` entry point
//! - **Error interception**: [`ErrorInterceptor`] and the default
//!   [`TraceInterceptor`]
//! - **Context seeding**: static or per-request-factory extensions
//! - **Testing utilities**: request constructors and recording handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod builder;
mod error;
mod intercept;
mod router;
mod seed;

pub mod testing;

pub use builder::{RouterBuilder, Scope};
pub use error::{BuildError, ConfigError};
pub use intercept::{ErrorInterceptor, TraceInterceptor};
pub use router::{RouteInfo, Router};
