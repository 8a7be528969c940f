use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::cart::model::LineItem;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderId;
use crate::domain::shared::value_objects::IdentityToken;

pub struct PlaceOrderParams {
    pub identity: Option<IdentityToken>,
    pub items: Vec<LineItem>,
    pub amount: BigDecimal,
    pub payment_id: String,
}

#[async_trait]
pub trait PlaceOrderUseCase: Send + Sync {
    async fn execute(&self, params: PlaceOrderParams) -> Result<OrderId, OrderError>;
}
