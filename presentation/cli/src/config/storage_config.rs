use std::path::PathBuf;

use super::env_lookup;

/// Where the cart snapshot lives on this device.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub dir: PathBuf,
    /// Keep the cart in memory only; nothing is written to `dir`.
    pub ephemeral: bool,
}

impl StorageConfig {
    /// Environment variables:
    /// - CART_STORE_DIR: Directory for cart snapshots (default: ".storefront")
    /// - CART_STORE_EPHEMERAL: "true" or "1" to keep the cart in memory only
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = lookup("CART_STORE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| ".storefront".to_string());

        let ephemeral = lookup("CART_STORE_EPHEMERAL")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            dir: PathBuf::from(dir),
            ephemeral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_local_directory() {
        let config = StorageConfig::from_lookup(|_| None);

        assert_eq!(config.dir, PathBuf::from(".storefront"));
        assert!(!config.ephemeral);
    }

    #[test]
    fn should_read_ephemeral_flag() {
        let config = StorageConfig::from_lookup(|key| {
            (key == "CART_STORE_EPHEMERAL").then(|| "True".to_string())
        });

        assert!(config.ephemeral);
    }

    #[test]
    fn should_read_store_dir() {
        let config = StorageConfig::from_lookup(|key| {
            (key == "CART_STORE_DIR").then(|| "/tmp/carts".to_string())
        });

        assert_eq!(config.dir, PathBuf::from("/tmp/carts"));
    }
}
