use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{NewOrder, OrderId, OrderLine};
use crate::domain::order::services::OrderGateway;
use crate::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};

pub struct PlaceOrderUseCaseImpl {
    pub gateway: Arc<dyn OrderGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl PlaceOrderUseCase for PlaceOrderUseCaseImpl {
    async fn execute(&self, params: PlaceOrderParams) -> Result<OrderId, OrderError> {
        // Local checks first: none of these reach the network
        let token = params.identity.ok_or(OrderError::LoginRequired)?;

        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        if params.payment_id.trim().is_empty() {
            return Err(OrderError::PaymentIdMissing);
        }

        let order = NewOrder {
            items: params.items.iter().map(OrderLine::from).collect(),
            amount: params.amount,
            payment_id: params.payment_id.trim().to_string(),
        };

        self.logger.info(&format!(
            "Placing order with {} item(s) for payment {}",
            order.items.len(),
            order.payment_id
        ));

        match self.gateway.place(&order, &token).await {
            Ok(order_id) => {
                self.logger.info(&format!("Order placed: {}", order_id));
                Ok(order_id)
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Order placement failed for payment {}: {}", order.payment_id, e));
                Err(e)
            }
        }
    }
}
