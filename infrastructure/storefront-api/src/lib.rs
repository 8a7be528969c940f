pub mod client;
pub mod order_gateway;
pub mod product_catalog;
pub mod promo_code_validator;
pub mod static_promo_codes;
