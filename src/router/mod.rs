//! # Router Module
//!
//! Classifies an incoming request into a [`RouteCategory`] using an ordered
//! table of `(method, path predicate)` rules.
//!
//! ## Matching
//!
//! Rules are evaluated top to bottom and the first match wins; when nothing
//! matches, the table's fallback category is returned. Paths are compared
//! with plain equality and prefix checks, so there is no compilation step and
//! no path-parameter capture here: segment extraction is the job of
//! [`crate::server::ParamBag`].
//!
//! ## Example
//!
//! ```rust
//! use fnrouter::router::{RouteCategory, RouteTable};
//!
//! let table = RouteTable::routing_demo();
//! assert_eq!(table.classify("GET", "/users/42"), RouteCategory::GetUserById);
//! assert_eq!(table.classify("GET", "/users"), RouteCategory::ListUsers);
//! assert_eq!(table.classify("DELETE", "/nope"), RouteCategory::NotFound);
//! ```

mod core;

pub use core::{PathMatcher, RouteCategory, RouteRule, RouteTable};
