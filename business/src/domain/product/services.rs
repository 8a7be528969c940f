use async_trait::async_trait;

use super::errors::ProductError;
use super::model::Product;
use crate::domain::shared::value_objects::ProductId;

/// Service port for the product catalog.
///
/// Supplies the product record a line item is populated from.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, ProductError>;
}
