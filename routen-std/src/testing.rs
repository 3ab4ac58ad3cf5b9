//! Testing utilities for Routen.
//!
//! This module provides utilities to make testing routes and handlers
//! easier.
//!
//! # Features
//!
//! - [`request`]: build a bodyless request from a method and URL
//! - [`text`]: build a plaintext response from a bare status code
//! - [`RecordingHandler`]: a handler that records every invocation
//! - [`CountingHandler`]: a handler that counts invocations

use bytes::Bytes;
use http::{Method, StatusCode};
use routen_core::{Context, Flow, Handler, HandlerOutput, Request, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a bodyless request for tests.
///
/// `url` may be a bare path (`/hello/ray`) or an absolute URL.
pub fn request(method: Method, url: &str) -> Request {
    let mut request = Request::new(Bytes::new());
    *request.method_mut() = method;
    *request.uri_mut() = url.parse().expect("test URL must parse");
    request
}

/// Build a plaintext response from a bare status code.
pub fn text(status: u16, body: impl Into<Bytes>) -> Response {
    routen_core::text(
        StatusCode::from_u16(status).expect("test status must be valid"),
        body,
    )
}

/// The UTF-8 body of a response, for assertions.
pub fn body_str(response: &Response) -> &str {
    std::str::from_utf8(response.body()).expect("test body must be UTF-8")
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records the path and params of every invocation.
///
/// By default it returns [`Flow::Continue`] (pass-through); configure a
/// response with [`RecordingHandler::respond_with`].
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// builder.middleware("/**", recorder.clone());
///
/// router.dispatch(request(Method::GET, "/a")).await?;
/// assert_eq!(recorder.calls(), vec!["/a".to_owned()]);
/// ```
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<String>>>,
    respond: Option<(StatusCode, Bytes)>,
}

impl RecordingHandler {
    /// Create a pass-through recorder.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            respond: None,
        }
    }

    /// Create a recorder that responds with the given status and body.
    pub fn respond_with(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            respond: Some((
                StatusCode::from_u16(status).expect("test status must be valid"),
                body.into(),
            )),
        }
    }

    /// The recorded request paths, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHandler {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            respond: self.respond.clone(),
        }
    }
}

impl Handler for RecordingHandler {
    async fn call(&self, request: Arc<Request>, _context: Arc<Context>) -> HandlerOutput {
        self.calls
            .lock()
            .unwrap()
            .push(request.uri().path().to_owned());
        match &self.respond {
            Some((status, body)) => Ok(Flow::Respond(routen_core::text(*status, body.clone()))),
            None => Ok(Flow::Continue),
        }
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and passes through.
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl Handler for CountingHandler {
    async fn call(&self, _request: Arc<Request>, _context: Arc<Context>) -> HandlerOutput {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Flow::Continue)
    }
}
