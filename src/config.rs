//! Configuration module for environment variable parsing.
//!
//! Every setting has a default matching the reference deployment, so the
//! gateway starts with no environment at all.

use std::env;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the gateway to listen on
    pub port: u16,

    /// URL of the trusted-range directory
    pub ranges_url: String,

    /// Downstream endpoint accepted webhooks are relayed to
    pub downstream_url: String,

    /// Seconds between trusted-range refreshes
    pub refresh_interval_secs: u64,

    /// Timeout for the directory fetch in milliseconds
    pub fetch_timeout_ms: u64,

    /// Timeout for the downstream relay call in milliseconds
    pub relay_timeout_ms: u64,

    /// Whether to honor the forwarded-address header when deciding the
    /// caller's address.
    ///
    /// Only sound behind a reverse proxy that overwrites the header on
    /// every request; anywhere else a caller can spoof a trusted address,
    /// so disable this in a hardened deployment.
    pub trust_forwarded_header: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(62200),

            ranges_url: env::var("RANGES_URL")
                .unwrap_or_else(|_| "https://ip-ranges.atlassian.com/".to_string()),

            downstream_url: env::var("DOWNSTREAM_URL").unwrap_or_else(|_| {
                "http://localhost:8080/generic-webhook-trigger/invoke".to_string()
            }),

            refresh_interval_secs: env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 60 * 60),

            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            relay_timeout_ms: env::var("RELAY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),

            trust_forwarded_header: parse_bool("TRUST_FORWARDED_HEADER", true),
        }
    }
}

/// Parse a boolean environment variable; accepts 1/0, true/false, yes/no.
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" => false,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid boolean, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_valid() {
        env::set_var("TEST_BOOL", "false");
        assert!(!parse_bool("TEST_BOOL", true));
        env::set_var("TEST_BOOL", "YES");
        assert!(parse_bool("TEST_BOOL", false));
        env::remove_var("TEST_BOOL");
    }

    #[test]
    fn test_parse_bool_default() {
        assert!(parse_bool("NONEXISTENT_BOOL_VAR", true));
        assert!(!parse_bool("NONEXISTENT_BOOL_VAR", false));
    }

    #[test]
    fn test_parse_bool_invalid_uses_default() {
        env::set_var("TEST_BOOL_BAD", "maybe");
        assert!(parse_bool("TEST_BOOL_BAD", true));
        env::remove_var("TEST_BOOL_BAD");
    }
}
