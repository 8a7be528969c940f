use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use business::domain::shared::value_objects::{IdentityToken, ProductId};

/// Shared storefront API HTTP client configuration.
#[derive(Clone)]
pub struct StorefrontClient {
    pub client: Client,
    pub base_url: String,
}

impl StorefrontClient {
    /// Every request made through this client is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the authorization header value.
    pub fn auth_header(token: &IdentityToken) -> String {
        format!("Bearer {}", token.expose())
    }

    /// Returns the promo code validation endpoint URL.
    pub fn promo_validation_url(&self) -> String {
        format!("{}/promocodes/validate", self.base_url)
    }

    /// Returns the orders endpoint URL.
    pub fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url)
    }

    /// Returns the URL of a single catalog product.
    pub fn product_url(&self, id: &ProductId) -> String {
        format!("{}/products/{}", self.base_url, id.as_str())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message of a non-2xx answer.
///
/// The server's `message` is passed through verbatim; without one the
/// status line is used.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("API Error: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_endpoints_without_double_slash() {
        let client = StorefrontClient::new("http://localhost:5000/api/", Duration::from_secs(5));

        assert_eq!(
            client.promo_validation_url(),
            "http://localhost:5000/api/promocodes/validate"
        );
        assert_eq!(client.orders_url(), "http://localhost:5000/api/orders");
        assert_eq!(
            client.product_url(&ProductId::new("65f0a1")),
            "http://localhost:5000/api/products/65f0a1"
        );
    }

    #[test]
    fn should_build_bearer_header() {
        let header = StorefrontClient::auth_header(&IdentityToken::new("abc"));

        assert_eq!(header, "Bearer abc");
    }

    #[test]
    fn should_pass_server_message_through() {
        let message = error_message(
            StatusCode::NOT_FOUND,
            br#"{"message":"Invalid or expired promo code"}"#,
        );

        assert_eq!(message, "Invalid or expired promo code");
    }

    #[test]
    fn should_fall_back_to_status_line() {
        let message = error_message(StatusCode::BAD_GATEWAY, b"<html>upstream down</html>");

        assert_eq!(message, "API Error: 502 Bad Gateway");
    }
}
