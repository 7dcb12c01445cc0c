//! # Runtime Configuration Module
//!
//! Switches for the two request-rewriting behaviours of the matcher.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_ROUTES_HEAD_FALLBACK`
//!
//! When a HEAD request matches no route, retry it as GET so GET routes also
//! serve HEAD. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
//!
//! Default: `true`
//!
//! ### `BRRTR_ROUTES_METHOD_OVERRIDE`
//!
//! Honour the `x-http-method-override` header and query parameter.
//!
//! Default: `true`
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_dsl::runtime_config::MatcherConfig;
//!
//! let config = MatcherConfig::from_env();
//! println!("HEAD fallback: {}", config.head_fallback);
//! ```
//!
//! The same settings can come from a TOML table:
//!
//! ```toml
//! head_fallback = true
//! method_override = false
//! ```

use serde::Deserialize;
use std::env;

/// Matcher behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Retry unmatched HEAD requests as GET
    pub head_fallback: bool,
    /// Honour `x-http-method-override`
    pub method_override: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            head_fallback: true,
            method_override: true,
        }
    }
}

impl MatcherConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            head_fallback: env_flag("BRRTR_ROUTES_HEAD_FALLBACK", defaults.head_fallback),
            method_override: env_flag("BRRTR_ROUTES_METHOD_OVERRIDE", defaults.method_override),
        }
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
