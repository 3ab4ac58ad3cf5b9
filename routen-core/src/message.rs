//! Request/response vocabulary.
//!
//! Routen speaks the `http` crate's types with [`Bytes`] bodies. There is no
//! HTTP parsing here: a transport adapter constructs the [`Request`] and
//! writes the returned [`Response`] back to its connection.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, StatusCode};

/// The request value fed into dispatch.
pub type Request = http::Request<Bytes>;

/// The response value produced by dispatch.
pub type Response = http::Response<Bytes>;

/// Build a plaintext response with the given status.
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Response {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// The terminal response for a request no route matched.
///
/// Body is `Cannot <METHOD> <path>`, status 404. This is the walk's normal
/// end state, not an error: a middleware that called `next()` receives it
/// and may propagate or replace it.
pub fn not_found(method: &Method, path: &str) -> Response {
    text(StatusCode::NOT_FOUND, format!("Cannot {method} {path}"))
}

/// The generic response sent when a handler fault is not mapped by the
/// configured error interceptor.
pub fn internal_error() -> Response {
    text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
