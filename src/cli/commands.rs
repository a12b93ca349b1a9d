use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::registry::{start_function, FunctionVariant};
use crate::runtime_config::RuntimeConfig;

/// Command-line interface for fnrouter
#[derive(Parser)]
#[command(name = "fnrouter")]
#[command(about = "Serve the routing demo or the in-memory user service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an HTTP server for one function variant
    Serve {
        /// Which function to serve
        #[arg(long, value_enum, default_value_t = FunctionVariant::Routing)]
        variant: FunctionVariant,

        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        addr: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// YAML configuration file; variant defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a variant's route table in evaluation order
    Routes {
        #[arg(long, value_enum, default_value_t = FunctionVariant::Routing)]
        variant: FunctionVariant,
    },
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Configuration, logging or bind failures, and a panicked server loop.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            variant,
            addr,
            port,
            config,
        } => {
            let config = match &config {
                Some(path) => AppConfig::from_yaml_file(path, variant)?,
                None => AppConfig::from_env(variant),
            };
            init_logging_with_config(&LogConfig::from_env())?;

            let runtime = RuntimeConfig::from_env();
            runtime.apply();

            let bind = format!("{addr}:{port}");
            info!(
                function = variant.function_name(),
                service = %config.service_name,
                version = %config.version,
                environment = %config.environment,
                stack_size = runtime.stack_size,
                addr = %bind,
                "Starting function"
            );
            let handle = start_function(variant, &config, bind.as_str())
                .with_context(|| format!("Failed to bind {bind}"))?;
            handle
                .join()
                .map_err(|e| anyhow::anyhow!("server loop panicked: {e:?}"))
        }
        Commands::Routes { variant } => {
            print!("{}", render_routes(variant));
            Ok(())
        }
    }
}

/// One line per rule, then the fallback.
#[must_use]
pub fn render_routes(variant: FunctionVariant) -> String {
    let table = variant.route_table();
    let rules: String = table
        .rules()
        .iter()
        .enumerate()
        .map(|(idx, rule)| format!("{:>2}. {rule}\n", idx + 1))
        .collect();
    format!("{variant}\n{rules}    fallback -> {}\n", table.fallback())
}
