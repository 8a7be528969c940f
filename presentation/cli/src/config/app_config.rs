use super::{api_config::ApiConfig, cart_config::CartConfig, storage_config::StorageConfig};

pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub cart: CartConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            storage: StorageConfig::from_env(),
            cart: CartConfig::from_env(),
        }
    }
}
