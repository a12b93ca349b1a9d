//! Unit tests for CLI parsing

use crate::cli::{render_routes, Cli, Commands};
use crate::registry::FunctionVariant;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["fnrouter", "serve", "--port", "9001"]).unwrap();
    match cli.command {
        Commands::Serve {
            variant,
            addr,
            port,
            config,
        } => {
            assert_eq!(variant, FunctionVariant::Routing);
            assert_eq!(addr, "0.0.0.0");
            assert_eq!(port, 9001);
            assert!(config.is_none());
        }
        Commands::Routes { .. } => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_with_variant_and_config() {
    let cli = Cli::try_parse_from([
        "fnrouter",
        "serve",
        "--variant",
        "advanced",
        "--port",
        "9002",
        "--config",
        "fnrouter.yaml",
    ])
    .unwrap();
    match cli.command {
        Commands::Serve {
            variant, config, ..
        } => {
            assert_eq!(variant, FunctionVariant::Advanced);
            assert_eq!(config.unwrap().to_string_lossy(), "fnrouter.yaml");
        }
        Commands::Routes { .. } => panic!("Expected Serve command"),
    }
}

#[test]
fn test_unknown_variant_rejected() {
    assert!(Cli::try_parse_from(["fnrouter", "routes", "--variant", "legacy"]).is_err());
}

#[test]
fn test_render_routes_order() {
    let out = render_routes(FunctionVariant::Advanced);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "AdvancedUserAPI");
    assert!(lines[1].contains("POST") && lines[1].ends_with("create_user"));
    assert!(lines[3].ends_with("get_user_by_id"));
    assert_eq!(lines[4].trim(), "fallback -> service_info");
}
