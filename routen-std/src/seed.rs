//! Context seeding.
//!
//! The seed supplies the user-defined extensions a request's context starts
//! with: nothing, a prebuilt value cloned per request, or a (possibly
//! asynchronous) factory run per request. The seed resolves before any
//! route is evaluated; a factory failure is a configuration fault, not a
//! handler error.

use crate::error::ConfigError;
use futures::future::BoxFuture;
use http::Extensions;
use routen_core::{BoxError, Request};
use std::future::Future;
use std::sync::Arc;

type SeedFactory =
    dyn Fn(Arc<Request>) -> BoxFuture<'static, Result<Extensions, BoxError>> + Send + Sync;

/// How each request's context extensions are produced.
#[derive(Clone, Default)]
pub(crate) enum ContextSeed {
    /// Every request starts with empty extensions.
    #[default]
    Empty,
    /// Every request starts with a clone of this value.
    Value(Extensions),
    /// Every request runs the factory.
    Factory(Arc<SeedFactory>),
}

impl ContextSeed {
    pub(crate) fn factory<F, Fut>(factory: F) -> Self
    where
        F: Fn(Arc<Request>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Extensions, BoxError>> + Send + 'static,
    {
        ContextSeed::Factory(Arc::new(move |request| Box::pin(factory(request))))
    }

    pub(crate) async fn resolve(&self, request: &Arc<Request>) -> Result<Extensions, ConfigError> {
        match self {
            ContextSeed::Empty => Ok(Extensions::new()),
            ContextSeed::Value(extensions) => Ok(extensions.clone()),
            ContextSeed::Factory(factory) => factory(Arc::clone(request))
                .await
                .map_err(ConfigError::Seed),
        }
    }
}
