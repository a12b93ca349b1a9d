use http::Method;

use super::Middleware;
use crate::dispatcher::HandlerResponse;
use crate::server::ParamBag;

/// Answers every `OPTIONS` request with `204` and no body, before routing.
///
/// Installed regardless of CORS configuration; [`super::CorsMiddleware`]
/// only decides which headers go on the answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreflightMiddleware;

impl Middleware for PreflightMiddleware {
    fn before(&self, req: &ParamBag) -> Option<HandlerResponse> {
        (req.method == Method::OPTIONS.as_str()).then(|| HandlerResponse::empty(204))
    }
}
