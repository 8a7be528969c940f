use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::errors::ProductError;
use crate::domain::shared::value_objects::ProductId;

/// A design as published in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub download_url: Option<String>,
}

pub struct NewProductProps {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub download_url: Option<String>,
}

impl NewProductProps {
    /// Props with only the fields a cart line needs.
    pub fn basic(id: impl Into<ProductId>, name: impl Into<String>, price: BigDecimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
            category: None,
            description: None,
            download_url: None,
        }
    }
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        if props.id.is_empty() {
            return Err(ProductError::IdEmpty);
        }

        if props.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }

        if props.price < BigDecimal::zero() {
            return Err(ProductError::NegativePrice);
        }

        Ok(Self {
            id: props.id,
            name: props.name,
            price: props.price,
            image_url: props.image_url,
            category: props.category,
            description: props.description,
            download_url: props.download_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_product_when_props_valid() {
        let result = Product::new(NewProductProps::basic("1", "Item 1", BigDecimal::from(100)));

        assert!(result.is_ok());
        let product = result.unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price, BigDecimal::from(100));
    }

    #[test]
    fn should_accept_free_product() {
        let result = Product::new(NewProductProps::basic("free", "Freebie", BigDecimal::zero()));

        assert!(result.is_ok());
    }

    #[test]
    fn should_reject_when_id_empty() {
        let result = Product::new(NewProductProps::basic("", "Item", BigDecimal::from(1)));

        assert!(matches!(result.unwrap_err(), ProductError::IdEmpty));
    }

    #[test]
    fn should_reject_when_name_only_whitespace() {
        let result = Product::new(NewProductProps::basic("1", "   ", BigDecimal::from(1)));

        assert!(matches!(result.unwrap_err(), ProductError::NameEmpty));
    }

    #[test]
    fn should_reject_when_price_negative() {
        let result = Product::new(NewProductProps::basic("1", "Item", BigDecimal::from(-5)));

        assert!(matches!(result.unwrap_err(), ProductError::NegativePrice));
    }
}
