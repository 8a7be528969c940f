use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::cart::model::LineItem;
use crate::domain::shared::value_objects::ProductId;

/// Identifier of a created order, as returned by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(serialize_with = "as_json_number")]
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price.clone(),
            quantity: item.quantity,
        }
    }
}

/// Finalized cart snapshot handed to the order service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<OrderLine>,
    #[serde(serialize_with = "as_json_number")]
    pub amount: BigDecimal,
    pub payment_id: String,
}

/// The order service expects plain JSON numbers for amounts.
fn as_json_number<S: Serializer>(amount: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.serialize_str(&amount.to_string()),
    }
}
