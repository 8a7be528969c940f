use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use business::domain::order::errors::OrderError;
use business::domain::order::model::{NewOrder, OrderId};
use business::domain::order::services::OrderGateway;
use business::domain::shared::value_objects::IdentityToken;

use crate::client::{StorefrontClient, error_message};

#[derive(Deserialize)]
struct CreatedOrderBody {
    #[serde(rename = "_id", alias = "id")]
    id: String,
}

pub struct OrderGatewayHttp {
    client: StorefrontClient,
}

impl OrderGatewayHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    fn parse_response(status: StatusCode, body: &[u8]) -> Result<OrderId, OrderError> {
        if !status.is_success() {
            return Err(OrderError::Rejected(error_message(status, body)));
        }

        let created: CreatedOrderBody = serde_json::from_slice(body)
            .map_err(|e| OrderError::Unavailable(format!("malformed order response: {}", e)))?;

        Ok(OrderId::new(created.id))
    }
}

#[async_trait]
impl OrderGateway for OrderGatewayHttp {
    async fn place(&self, order: &NewOrder, token: &IdentityToken) -> Result<OrderId, OrderError> {
        let response = self
            .client
            .client
            .post(self.client.orders_url())
            .header("Authorization", StorefrontClient::auth_header(token))
            .json(order)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        Self::parse_response(status, &body)
    }
}

fn transport_error(e: reqwest::Error) -> OrderError {
    if e.is_timeout() {
        OrderError::Timeout
    } else {
        OrderError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_mongo_style_id() {
        let result = OrderGatewayHttp::parse_response(
            StatusCode::CREATED,
            br#"{"_id":"6650aa","status":"paid","amount":270}"#,
        );

        assert_eq!(result.unwrap(), OrderId::new("6650aa"));
    }

    #[test]
    fn should_accept_plain_id() {
        let result = OrderGatewayHttp::parse_response(StatusCode::OK, br#"{"id":"ord_1"}"#);

        assert_eq!(result.unwrap(), OrderId::new("ord_1"));
    }

    #[test]
    fn should_surface_rejection_message() {
        let result = OrderGatewayHttp::parse_response(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Token is not valid"}"#,
        );

        assert!(matches!(
            result.unwrap_err(),
            OrderError::Rejected(message) if message == "Token is not valid"
        ));
    }

    #[test]
    fn should_flag_response_without_id() {
        let result = OrderGatewayHttp::parse_response(StatusCode::CREATED, br#"{"status":"paid"}"#);

        assert!(matches!(result.unwrap_err(), OrderError::Unavailable(_)));
    }
}
