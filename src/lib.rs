//! # fnrouter
//!
//! **fnrouter** is a small HTTP request dispatcher packaged as independently
//! servable functions, built on the `may` coroutine runtime and
//! `may_minihttp`.
//!
//! ## Overview
//!
//! Two functions ship in this crate:
//!
//! - **Routing demo** (`RoutingDemo`): classifies a request against a fixed,
//!   ordered set of routes and echoes everything it extracted from it
//! - **User service** (`AdvancedUserAPI`): create, list and fetch users in a
//!   validated in-memory store
//!
//! ## Architecture
//!
//! - **[`validator`]** - name and email predicates
//! - **[`store`]** / **[`models`]** - the in-memory [`store::UserStore`]
//! - **[`router`]** - ordered first-match-wins route classification
//! - **[`server`]** - request extraction into a [`server::ParamBag`], the
//!   `may_minihttp` service and server lifecycle
//! - **[`dispatcher`]** - middleware plus category → handler dispatch
//! - **[`handlers`]** - per-route handlers and their payload shapes
//! - **[`middleware`]** - preflight answers, CORS and request tracing
//! - **[`registry`]** - wiring of each function variant
//! - **[`config`]**, **[`logging`]**, **[`runtime_config`]** - ambient setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as FunctionService<br/>(may_minihttp)
//!     participant Extract as ParamBag::extract
//!     participant Dispatcher
//!     participant Middleware as Middleware Chain
//!     participant Router as RouteTable
//!     participant Handler
//!     participant Store as UserStore
//!
//!     Client->>Server: HTTP Request<br/>GET /users/7
//!     Server->>Extract: RawRequest (method, target, headers, JSON body)
//!     Extract-->>Server: ParamBag
//!     Server->>Dispatcher: dispatch(&bag)
//!     Dispatcher->>Middleware: before()
//!     alt OPTIONS
//!         Middleware-->>Dispatcher: 204, no body
//!     else
//!         Dispatcher->>Router: classify("GET", "/users/7")
//!         Router-->>Dispatcher: GetUserById
//!         Dispatcher->>Handler: handler(&bag, &store)
//!         Handler->>Store: get(7)
//!         Store-->>Handler: Option<User>
//!         Handler-->>Dispatcher: HandlerResponse
//!     end
//!     Dispatcher->>Middleware: after()
//!     Dispatcher-->>Server: HandlerResponse
//!     Server-->>Client: JSON body, Content-Type: application/json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fnrouter::config::AppConfig;
//! use fnrouter::registry::{start_function, FunctionVariant};
//!
//! let config = AppConfig::from_env(FunctionVariant::Advanced);
//! let handle = start_function(FunctionVariant::Advanced, &config, "0.0.0.0:8080")?;
//! handle.wait_ready()?;
//! handle.join().ok();
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod store;
pub mod validator;

pub use dispatcher::{Dispatcher, HandlerResponse};
pub use error::ServiceError;
pub use registry::FunctionVariant;
pub use server::ParamBag;
pub use store::{UserStore, ValidationError};
