use std::time::Duration;

use tracing::{info, warn};

use super::Middleware;
use crate::dispatcher::HandlerResponse;
use crate::server::ParamBag;

/// Logs one event when a request arrives and one when its response is ready.
///
/// The request id is not repeated here: the server wraps dispatch in a
/// `request` span that already carries it.
pub struct TracingMiddleware {
    service: String,
}

impl TracingMiddleware {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Middleware for TracingMiddleware {
    fn before(&self, req: &ParamBag) -> Option<HandlerResponse> {
        info!(
            service = %self.service,
            method = %req.method,
            path = %req.path,
            query_count = req.query_params.len(),
            "Request received"
        );
        None
    }

    fn after(&self, req: &ParamBag, res: &mut HandlerResponse, latency: Duration) {
        let latency_ms = latency.as_millis() as u64;
        if res.status >= 500 {
            warn!(
                service = %self.service,
                method = %req.method,
                path = %req.path,
                status = res.status,
                latency_ms,
                "Request failed"
            );
        } else {
            info!(
                service = %self.service,
                status = res.status,
                latency_ms,
                "Request completed"
            );
        }
    }
}
