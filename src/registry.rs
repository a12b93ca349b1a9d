//! Deployment variants and their handler wiring.
//!
//! Each variant is a self-contained function: its own route table, its own
//! handler set, one shared store.

use std::fmt;
use std::io;
use std::net::ToSocketAddrs;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::handlers::{demo, users};
use crate::middleware::{CorsMiddleware, PreflightMiddleware, TracingMiddleware};
use crate::router::{RouteCategory, RouteTable};
use crate::server::{FunctionService, HttpServer, ServerHandle};
use crate::store::UserStore;

/// The functions this crate can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionVariant {
    /// Echoes extracted parameters for a fixed set of demo routes
    Routing,
    /// User service backed by the in-memory store
    Advanced,
}

impl FunctionVariant {
    /// Name the function is registered under with a hosting runtime.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        match self {
            FunctionVariant::Routing => "RoutingDemo",
            FunctionVariant::Advanced => "AdvancedUserAPI",
        }
    }

    /// Default service name used in configuration and logs.
    #[must_use]
    pub fn service_name(&self) -> &'static str {
        match self {
            FunctionVariant::Routing => "routing-demo",
            FunctionVariant::Advanced => "advanced-user-service",
        }
    }

    #[must_use]
    pub fn route_table(&self) -> RouteTable {
        match self {
            FunctionVariant::Routing => RouteTable::routing_demo(),
            FunctionVariant::Advanced => RouteTable::user_service(),
        }
    }
}

impl fmt::Display for FunctionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Register the routing demo's handlers.
pub fn register_routing(dispatcher: &mut Dispatcher) {
    dispatcher.register_handler(RouteCategory::Home, demo::home);
    dispatcher.register_handler(RouteCategory::GetUserById, demo::get_user);
    dispatcher.register_handler(RouteCategory::ListUsers, demo::list_users);
    dispatcher.register_handler(RouteCategory::CreateUser, demo::create_user);
    dispatcher.register_handler(RouteCategory::ProductReview, demo::product_review);
    dispatcher.register_handler(RouteCategory::Search, demo::search);
    dispatcher.register_handler(RouteCategory::ApiV1, demo::api_v1);
    dispatcher.register_handler(RouteCategory::ApiV2, demo::api_v2);
    dispatcher.register_handler(RouteCategory::NotFound, demo::not_found);
}

/// Register the user service's handlers.
pub fn register_advanced(dispatcher: &mut Dispatcher, config: &AppConfig) {
    dispatcher.register_handler(RouteCategory::CreateUser, users::create_user);
    dispatcher.register_handler(RouteCategory::ListUsers, users::list_users);
    dispatcher.register_handler(RouteCategory::GetUserById, users::get_user);
    dispatcher.register_handler(
        RouteCategory::ServiceInfo,
        users::service_info(&config.service_name, &config.version),
    );
}

/// Fully wired dispatcher for a variant: route table, handlers, and the
/// preflight, CORS (when enabled) and tracing middleware.
#[must_use]
pub fn build_dispatcher(
    variant: FunctionVariant,
    store: Arc<UserStore>,
    config: &AppConfig,
) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(variant.route_table(), store);
    match variant {
        FunctionVariant::Routing => register_routing(&mut dispatcher),
        FunctionVariant::Advanced => register_advanced(&mut dispatcher, config),
    }

    dispatcher.add_middleware(Arc::new(PreflightMiddleware));
    if config.cors.enabled {
        dispatcher.add_middleware(Arc::new(CorsMiddleware::from_config(&config.cors)));
    }
    let tracing = TracingMiddleware::new(config.service_name.clone());
    dispatcher.add_middleware(Arc::new(tracing));

    info!(
        function = variant.function_name(),
        service = %config.service_name,
        environment = %config.environment,
        cors_enabled = config.cors.enabled,
        handlers = dispatcher.handlers.len(),
        "Dispatcher ready"
    );
    dispatcher
}

/// Build a variant over a fresh store and start serving it on `addr`.
///
/// # Errors
///
/// Fails if the address cannot be bound.
pub fn start_function<A: ToSocketAddrs>(
    variant: FunctionVariant,
    config: &AppConfig,
    addr: A,
) -> io::Result<ServerHandle> {
    let store = Arc::new(UserStore::new());
    let dispatcher = Arc::new(build_dispatcher(variant, store, config));
    HttpServer(FunctionService::new(dispatcher)).start(addr)
}
