//! Handler outcome values.

use crate::message::Response;

/// What a handler decided about the current request.
///
/// This is the explicit form of the walk's propagation protocol; there is no
/// runtime inspection of what a handler happened to return.
#[derive(Debug)]
pub enum Flow {
    /// No response yet; run the next handler in the chain (or, when the
    /// chain is exhausted, resume scanning subsequent routes).
    Continue,

    /// Respond now. First response wins: the remaining handlers of the
    /// current chain and all remaining candidate routes are skipped.
    Respond(Response),

    /// Stage a response but keep running the current chain, so a later
    /// handler in the same chain may replace it. When the chain ends with a
    /// staged response, that response is returned. `Override(None)` clears
    /// the stage.
    Override(Option<Response>),
}

impl From<Response> for Flow {
    fn from(response: Response) -> Self {
        Flow::Respond(response)
    }
}
