//! # CLI Module
//!
//! ## Commands
//!
//! ### `serve`
//!
//! ```bash
//! fnrouter serve --variant advanced --port 9000
//! PORT=9000 fnrouter serve --variant routing --config fnrouter.yaml
//! ```
//!
//! Options:
//! - `--variant <routing|advanced>` - function to serve (default: routing)
//! - `--addr <HOST>` - interface to bind (default: 0.0.0.0)
//! - `--port <N>` - listen port; also read from `PORT` (default: 8080)
//! - `--config <FILE>` - YAML overrides for service name, version,
//!   environment and CORS
//!
//! ### `routes`
//!
//! Print the rule table a variant evaluates, first rule first:
//!
//! ```bash
//! fnrouter routes --variant routing
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{render_routes, run_cli, Cli, Commands};
