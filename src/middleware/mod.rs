mod core;
mod cors;
mod preflight;
mod tracing;

pub use core::Middleware;
pub use cors::CorsMiddleware;
pub use preflight::PreflightMiddleware;
pub use tracing::TracingMiddleware;
