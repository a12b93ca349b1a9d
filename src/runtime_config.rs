//! # Runtime Configuration Module
//!
//! Environment-driven tuning of the `may` coroutine runtime.
//!
//! ## Environment Variables
//!
//! ### `FNR_STACK_SIZE`
//!
//! Stack size for each connection coroutine. Accepts decimal (`32768`) or
//! hexadecimal with a `0x` prefix (`0x8000`). Unparseable values fall back to
//! the default of `0x8000` (32 KB).
//!
//! ```rust
//! use fnrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! assert!(config.stack_size > 0);
//! ```

use std::env;

/// Default coroutine stack size (32 KB)
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        RuntimeConfig {
            stack_size: parse_stack_size(env::var("FNR_STACK_SIZE").ok().as_deref()),
        }
    }

    /// Apply to the global `may` configuration. Must run before the server
    /// spawns its first coroutine.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_stack_size(raw: Option<&str>) -> usize {
    let Some(val) = raw.map(str::trim) else {
        return DEFAULT_STACK_SIZE;
    };
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.filter(|&n| n > 0).unwrap_or(DEFAULT_STACK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stack_size() {
        assert_eq!(parse_stack_size(None), DEFAULT_STACK_SIZE);
        assert_eq!(parse_stack_size(Some("0x4000")), 0x4000);
        assert_eq!(parse_stack_size(Some("65536")), 65536);
        assert_eq!(parse_stack_size(Some("0xZZ")), DEFAULT_STACK_SIZE);
        assert_eq!(parse_stack_size(Some("0")), DEFAULT_STACK_SIZE);
    }
}
