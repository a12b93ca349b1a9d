//! # Dispatcher Module
//!
//! Connects the request classifier to the route handlers.
//!
//! ## Request Flow
//!
//! 1. The server turns the wire request into a [`ParamBag`](crate::server::ParamBag)
//! 2. Middleware `before` hooks run; the first one returning a response wins
//! 3. Otherwise the [`RouteTable`](crate::router::RouteTable) picks a category
//!    and the handler registered for it runs against the shared store
//! 4. Middleware `after` hooks decorate the response
//!
//! ## Error Handling
//!
//! - A category with no registered handler returns `500`
//! - Handlers never fail: every outcome, including bad input, is a response
//!
//! ```rust
//! use std::sync::Arc;
//! use fnrouter::dispatcher::Dispatcher;
//! use fnrouter::handlers::demo;
//! use fnrouter::router::{RouteCategory, RouteTable};
//! use fnrouter::server::{ParamBag, RawRequest};
//! use fnrouter::store::UserStore;
//!
//! let mut dispatcher = Dispatcher::new(RouteTable::routing_demo(), Arc::new(UserStore::new()));
//! dispatcher.register_handler(RouteCategory::Search, demo::search);
//!
//! let bag = ParamBag::extract(RawRequest::new("GET", "/search?q=shoe"));
//! assert_eq!(dispatcher.dispatch(&bag).status, 200);
//! ```

mod core;

pub use core::{
    Dispatcher, HandlerFn, HandlerResponse, HeaderVec, JSON_CONTENT_TYPE, MAX_INLINE_HEADERS,
};
