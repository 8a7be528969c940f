use async_trait::async_trait;

use crate::domain::errors::StoreError;

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Port for the durable, device-scoped key-value store.
///
/// No expiry: whatever is written stays until overwritten.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
