use std::sync::Arc;

use anyhow::Context;

use logger::TracingLogger;
use persistence::{FileCartStore, InMemoryCartStore};
use storefront_api::client::StorefrontClient;
use storefront_api::order_gateway::OrderGatewayHttp;
use storefront_api::product_catalog::ProductCatalogHttp;
use storefront_api::promo_code_validator::PromoCodeValidatorHttp;
use storefront_api::static_promo_codes::StaticPromoCodeValidator;

use business::application::cart::session::{CartSession, CartSessionDependencies};
use business::application::order::place::PlaceOrderUseCaseImpl;
use business::domain::cart::store::CartStore;
use business::domain::product::services::ProductCatalog;
use business::domain::promo_code::services::PromoCodeValidator;
use business::domain::shared::value_objects::IdentityToken;

use crate::config::app_config::AppConfig;
use crate::setup::console_notifier::ConsoleNotifier;

pub struct DependencyContainer {
    pub session: CartSession,
    pub catalog: Arc<dyn ProductCatalog>,
    pub identity: Option<IdentityToken>,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let cart_logger = Arc::new(TracingLogger::new("cart"));
        let order_logger = Arc::new(TracingLogger::new("order"));

        let store: Arc<dyn CartStore> = if config.storage.ephemeral {
            tracing::info!("ephemeral mode: cart is kept in memory only");
            Arc::new(InMemoryCartStore::new())
        } else {
            tokio::fs::create_dir_all(&config.storage.dir)
                .await
                .with_context(|| {
                    format!("creating cart store at {}", config.storage.dir.display())
                })?;
            Arc::new(FileCartStore::new(config.storage.dir.clone()))
        };

        // Infrastructure adapters
        let client = StorefrontClient::new(&config.api.base_url, config.api.timeout);
        let catalog: Arc<dyn ProductCatalog> = Arc::new(ProductCatalogHttp::new(client.clone()));
        let gateway = Arc::new(OrderGatewayHttp::new(client.clone()));
        let validator: Arc<dyn PromoCodeValidator> = if config.api.offline {
            tracing::info!("offline mode: promo codes validated locally");
            Arc::new(StaticPromoCodeValidator::with_defaults())
        } else {
            Arc::new(PromoCodeValidatorHttp::new(client))
        };

        // Use cases
        let place_order = Arc::new(PlaceOrderUseCaseImpl {
            gateway,
            logger: order_logger,
        });

        let session = CartSession::restore(
            CartSessionDependencies {
                store,
                validator,
                place_order,
                notifier: Arc::new(ConsoleNotifier),
                logger: cart_logger,
            },
            config.cart.session_config(),
        )
        .await;

        Ok(Self {
            session,
            catalog,
            identity: config.api.token.clone().map(IdentityToken::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::api_config::ApiConfig;
    use crate::config::cart_config::CartConfig;
    use crate::config::storage_config::StorageConfig;

    #[tokio::test]
    async fn should_not_touch_disk_in_ephemeral_mode() {
        let dir = std::env::temp_dir().join(format!("storefront-ephemeral-{}", std::process::id()));
        let config = AppConfig {
            api: ApiConfig::from_lookup(|_| None),
            storage: StorageConfig {
                dir: dir.clone(),
                ephemeral: true,
            },
            cart: CartConfig::from_lookup(|_| None),
        };

        let container = DependencyContainer::new(&config).await.unwrap();

        assert!(container.session.items().is_empty());
        assert!(container.identity.is_none());
        container.session.shutdown().await;
        assert!(!dir.exists());
    }
}
