use async_trait::async_trait;

use super::errors::OrderError;
use super::model::{NewOrder, OrderId};
use crate::domain::shared::value_objects::IdentityToken;

/// Service port for the remote order placement.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place(&self, order: &NewOrder, token: &IdentityToken) -> Result<OrderId, OrderError>;
}
