//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::time::Duration;

/// Mount point of all application routes
pub const API_PREFIX: &str = "/api";

/// Path prefix covered by the authentication rate limiter
pub const AUTH_PREFIX: &str = "/api/auth";

/// Length of one authentication rate-limit window
pub const AUTH_RATE_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Requests allowed per client within one window
pub const AUTH_RATE_MAX: u32 = 5;

/// Upper bound for JSON request bodies
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origins allowed to call the API with credentials.
    /// Example: ALLOWED_ORIGINS=https://app.example.com,http://localhost:5173
    pub allowed_origins: Vec<String>,

    /// Take the client address from `X-Forwarded-For` when running behind a proxy
    pub trust_proxy: bool,

    pub auth_rate_window: Duration,
    pub auth_rate_max: u32,
    pub json_body_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|value| parse_origins(&value))
                .unwrap_or_default(),
            trust_proxy: std::env::var("TRUST_PROXY")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            ..Self::default()
        }
    }

    /// Check if any cross-origin caller is allowed
    pub fn has_allowed_origins(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            trust_proxy: false,
            auth_rate_window: AUTH_RATE_WINDOW,
            auth_rate_max: AUTH_RATE_MAX,
            json_body_limit: JSON_BODY_LIMIT,
        }
    }
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gateway_limits() {
        let config = Config::default();

        assert_eq!(config.auth_rate_window, Duration::from_secs(900));
        assert_eq!(config.auth_rate_max, 5);
        assert_eq!(config.json_body_limit, 10 * 1024 * 1024);
        assert!(!config.trust_proxy);
        assert!(!config.has_allowed_origins());
    }

    #[test]
    fn test_parse_single_origin() {
        assert_eq!(
            parse_origins("https://carelink.example"),
            vec!["https://carelink.example".to_string()]
        );
    }

    #[test]
    fn test_parse_origin_list() {
        let origins = parse_origins(" https://a.example , http://localhost:5173/,, ");
        assert_eq!(
            origins,
            vec![
                "https://a.example".to_string(),
                "http://localhost:5173".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_empty_origin_list() {
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Values depend on the environment; only the fixed limits are asserted
        let config = Config::from_env();

        assert_eq!(config.auth_rate_max, AUTH_RATE_MAX);
        assert_eq!(config.json_body_limit, JSON_BODY_LIMIT);
    }
}
