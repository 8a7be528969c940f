use std::time::Duration;

use business::application::cart::session::CartSessionConfig;

use super::{env_lookup, parse_or};

#[derive(Debug, Clone)]
pub struct CartConfig {
    pub persist_debounce: Duration,
    pub promo_timeout: Duration,
}

impl CartConfig {
    /// Environment variables:
    /// - CART_PERSIST_DEBOUNCE_MS: Quiet period before saving (default: 300)
    /// - CART_PROMO_TIMEOUT_SECS: Promo validation timeout (default: 30)
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debounce_ms = parse_or(&lookup, "CART_PERSIST_DEBOUNCE_MS", 300u64);
        let promo_timeout_secs = parse_or(&lookup, "CART_PROMO_TIMEOUT_SECS", 30u64);

        Self {
            persist_debounce: Duration::from_millis(debounce_ms),
            promo_timeout: Duration::from_secs(promo_timeout_secs),
        }
    }

    pub fn session_config(&self) -> CartSessionConfig {
        CartSessionConfig {
            persist_debounce: self.persist_debounce,
            promo_timeout: self.promo_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_match_session_defaults_when_unset() {
        let config = CartConfig::from_lookup(|_| None).session_config();
        let defaults = CartSessionConfig::default();

        assert_eq!(config.persist_debounce, defaults.persist_debounce);
        assert_eq!(config.promo_timeout, defaults.promo_timeout);
    }

    #[test]
    fn should_read_timings() {
        let config = CartConfig::from_lookup(|key| match key {
            "CART_PERSIST_DEBOUNCE_MS" => Some("50".to_string()),
            "CART_PROMO_TIMEOUT_SECS" => Some("3".to_string()),
            _ => None,
        });

        assert_eq!(config.persist_debounce, Duration::from_millis(50));
        assert_eq!(config.promo_timeout, Duration::from_secs(3));
    }
}
