use async_trait::async_trait;
use bigdecimal::BigDecimal;
use reqwest::StatusCode;
use serde::Deserialize;

use business::domain::product::errors::ProductError;
use business::domain::product::model::{NewProductProps, Product};
use business::domain::product::services::ProductCatalog;
use business::domain::shared::value_objects::ProductId;

use crate::client::{StorefrontClient, error_message};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductBody {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    name: String,
    price: BigDecimal,
    image_url: Option<String>,
    category: Option<String>,
    description: Option<String>,
    download_url: Option<String>,
}

pub struct ProductCatalogHttp {
    client: StorefrontClient,
}

impl ProductCatalogHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    fn parse_response(status: StatusCode, body: &[u8]) -> Result<Product, ProductError> {
        if status == StatusCode::NOT_FOUND {
            return Err(ProductError::NotFound);
        }
        if !status.is_success() {
            return Err(ProductError::CatalogUnavailable(error_message(status, body)));
        }

        let parsed: ProductBody = serde_json::from_slice(body).map_err(|e| {
            ProductError::CatalogUnavailable(format!("malformed product response: {}", e))
        })?;

        Product::new(NewProductProps {
            id: ProductId::new(parsed.id),
            name: parsed.name,
            price: parsed.price,
            image_url: parsed.image_url,
            category: parsed.category,
            description: parsed.description,
            download_url: parsed.download_url,
        })
    }
}

#[async_trait]
impl ProductCatalog for ProductCatalogHttp {
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, ProductError> {
        let response = self
            .client
            .client
            .get(self.client.product_url(id))
            .send()
            .await
            .map_err(|e| ProductError::CatalogUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProductError::CatalogUnavailable(e.to_string()))?;

        Self::parse_response(status, &body)
    }
}
