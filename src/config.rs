//! Service configuration.
//!
//! Defaults come from the deployment variant, an optional YAML file may
//! override any subset of them, and a couple of environment variables are
//! applied last:
//!
//! - `ENV`: environment label reported in logs and service info
//! - `FNR_CORS_ENABLED`: `true`/`false`/`1`/`0`
//!
//! ```yaml
//! service_name: users-eu
//! environment: staging
//! cors:
//!   enabled: true
//!   origins: ["https://app.example"]
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::registry::FunctionVariant;

/// Environment label used when `ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Cross-origin policy applied by the CORS middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

/// Effective configuration of one function deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub service_name: String,
    pub version: String,
    pub environment: String,
    pub cors: CorsConfig,
}

/// Partial configuration as read from disk; absent keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    service_name: Option<String>,
    version: Option<String>,
    environment: Option<String>,
    cors: Option<CorsConfig>,
}

impl AppConfig {
    /// Built-in defaults for a variant.
    #[must_use]
    pub fn for_variant(variant: FunctionVariant) -> Self {
        Self {
            service_name: variant.service_name().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            cors: CorsConfig::default(),
        }
    }

    /// Variant defaults with the process environment applied.
    #[must_use]
    pub fn from_env(variant: FunctionVariant) -> Self {
        Self::for_variant(variant).with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load a YAML file over the variant defaults, then apply the process
    /// environment.
    pub fn from_yaml_file(path: &Path, variant: FunctionVariant) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml_str(&content, variant)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    fn from_yaml_str(content: &str, variant: FunctionVariant) -> anyhow::Result<Self> {
        let mut config = Self::for_variant(variant);
        // an empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(config);
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        if let Some(name) = file.service_name {
            config.service_name = name;
        }
        if let Some(version) = file.version {
            config.version = version;
        }
        if let Some(environment) = file.environment {
            config.environment = environment;
        }
        if let Some(cors) = file.cors {
            config.cors = cors;
        }
        Ok(config)
    }

    /// Apply `ENV` and `FNR_CORS_ENABLED` from `lookup`. Unparseable booleans
    /// are ignored.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("ENV").filter(|v| !v.trim().is_empty()) {
            self.environment = env.trim().to_string();
        }
        if let Some(enabled) = lookup("FNR_CORS_ENABLED").as_deref().and_then(parse_bool) {
            self.cors.enabled = enabled;
        }
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
