use crate::handlers::{ErrorPayload, Payload};
use crate::middleware::Middleware;
use crate::router::{RouteCategory, RouteTable};
use crate::server::ParamBag;
use crate::store::UserStore;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 8;

/// Response header lines in `Name: value` form.
///
/// Lines are `'static` because `may_minihttp` only accepts static header
/// strings; dynamic values are built once at startup, never per request.
pub type HeaderVec = SmallVec<[&'static str; MAX_INLINE_HEADERS]>;

/// Content type written on every response.
pub const JSON_CONTENT_TYPE: &str = "Content-Type: application/json";

/// Shared route handler.
///
/// Handlers borrow the request's parameter bag and the shared store and
/// always produce a response. Most are plain `fn`s; closures let a handler
/// capture startup configuration.
pub type HandlerFn = Arc<dyn Fn(&ParamBag, &UserStore) -> HandlerResponse + Send + Sync>;

/// Status, headers and typed payload produced for one request.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Extra header lines, written after `Content-Type`
    pub headers: HeaderVec,
    /// Payload; `None` writes an empty body
    pub body: Option<Payload>,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, body: Payload) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Some(body),
        }
    }

    /// Response with no body, e.g. a `204` preflight answer.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Add or replace a header line; an existing line with the same name
    /// (case-insensitive) is dropped first.
    pub fn set_header(&mut self, line: &'static str) {
        if let Some(name) = header_name(line) {
            self.headers.retain(|existing| {
                !header_name(existing).is_some_and(|n| n.eq_ignore_ascii_case(name))
            });
        }
        self.headers.push(line);
    }

    /// Value of a header by name (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&'static str> {
        self.headers.iter().copied().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }

    /// Serialized body bytes; empty when there is no payload.
    pub fn body_bytes(&self) -> serde_json::Result<Vec<u8>> {
        match &self.body {
            Some(payload) => serde_json::to_vec(payload),
            None => Ok(Vec::new()),
        }
    }
}

fn header_name(line: &str) -> Option<&str> {
    line.split_once(':').map(|(name, _)| name.trim())
}

/// Routes a parameter bag to the handler registered for its category.
///
/// One dispatcher serves one deployment variant: its [`RouteTable`] decides
/// the category, the handler map decides what runs, and the store is shared
/// by every request.
pub struct Dispatcher {
    routes: RouteTable,
    /// Map of route categories to their handlers
    pub handlers: HashMap<RouteCategory, HandlerFn>,
    /// Ordered list of middleware to apply to requests/responses
    pub middlewares: Vec<Arc<dyn Middleware>>,
    store: Arc<UserStore>,
}

impl Dispatcher {
    /// Create a dispatcher with no handlers and no middleware.
    #[must_use]
    pub fn new(routes: RouteTable, store: Arc<UserStore>) -> Self {
        Self {
            routes,
            handlers: HashMap::new(),
            middlewares: Vec::new(),
            store,
        }
    }

    /// Register the handler for a category, replacing any previous one.
    pub fn register_handler<F>(&mut self, category: RouteCategory, handler: F)
    where
        F: Fn(&ParamBag, &UserStore) -> HandlerResponse + Send + Sync + 'static,
    {
        if self.handlers.insert(category, Arc::new(handler)).is_some() {
            warn!(
                category = %category,
                total_handlers = self.handlers.len(),
                "Replaced existing handler"
            );
        } else {
            info!(
                category = %category,
                total_handlers = self.handlers.len(),
                "Handler registered successfully"
            );
        }
    }

    /// Add middleware to the processing pipeline
    ///
    /// Middleware runs in insertion order for both `before` and `after`.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[must_use]
    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// Produce the response for one request.
    ///
    /// Every middleware sees `before`; the first one to answer short-circuits
    /// the handler. Every middleware then sees `after`, including for
    /// short-circuited responses.
    #[must_use]
    pub fn dispatch(&self, bag: &ParamBag) -> HandlerResponse {
        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            if early_resp.is_none() {
                early_resp = mw.before(bag);
                if early_resp.is_some() {
                    debug!(
                        middleware_idx = idx,
                        middleware_name = std::any::type_name_of_val(mw.as_ref()),
                        "Middleware returned early response"
                    );
                }
            } else {
                let _ = mw.before(bag);
            }
        }

        let (mut resp, latency) = match early_resp {
            Some(r) => (r, Duration::ZERO),
            None => {
                let start = Instant::now();
                let r = self.invoke(bag);
                (r, start.elapsed())
            }
        };

        for mw in &self.middlewares {
            mw.after(bag, &mut resp, latency);
        }

        debug!(
            method = %bag.method,
            path = %bag.path,
            status = resp.status,
            latency_us = latency.as_micros() as u64,
            "Request dispatched"
        );
        resp
    }

    fn invoke(&self, bag: &ParamBag) -> HandlerResponse {
        let category = self.routes.classify(&bag.method, &bag.path);
        match self.handlers.get(&category) {
            Some(handler) => {
                debug!(category = %category, "Handler invoked");
                handler(bag, self.store.as_ref())
            }
            None => {
                let available: Vec<&str> =
                    self.handlers.keys().map(RouteCategory::as_str).collect();
                error!(
                    category = %category,
                    available_handlers = ?available,
                    "Handler not found - CRITICAL"
                );
                HandlerResponse::new(
                    500,
                    Payload::Error(ErrorPayload {
                        error: "Handler not registered".to_string(),
                        method: bag.method.clone(),
                        path: bag.path.clone(),
                    }),
                )
            }
        }
    }
}
