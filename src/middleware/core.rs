use std::time::Duration;

use crate::dispatcher::HandlerResponse;
use crate::server::ParamBag;

/// Hook around handler dispatch.
///
/// `before` may answer the request itself; `after` sees every response,
/// whether it came from a handler or from another middleware's `before`.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &ParamBag) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &ParamBag, _res: &mut HandlerResponse, _latency: Duration) {}
}
