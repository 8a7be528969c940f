use std::time::Duration;

use super::{env_lookup, parse_or};

/// Storefront API access.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Validate promo codes against the built-in table instead of the API.
    pub offline: bool,
    pub token: Option<String>,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    ///
    /// Environment variables:
    /// - STOREFRONT_API_URL: Base URL of the API (default: "http://localhost:5000/api")
    /// - STOREFRONT_HTTP_TIMEOUT_SECS: Per-request timeout (default: 30)
    /// - STOREFRONT_OFFLINE: "true" or "1" to skip HTTP promo validation
    /// - STOREFRONT_TOKEN: Identity token used at checkout (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("STOREFRONT_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:5000/api".to_string());
        let timeout_secs = parse_or(&lookup, "STOREFRONT_HTTP_TIMEOUT_SECS", 30u64);
        let offline = lookup("STOREFRONT_OFFLINE")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let token = lookup("STOREFRONT_TOKEN").filter(|token| !token.trim().is_empty());

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            offline,
            token,
        }
    }
}
