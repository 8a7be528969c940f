#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.id_empty")]
    IdEmpty,
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.negative_price")]
    NegativePrice,
    #[error("product.not_found")]
    NotFound,
    #[error("product.catalog_unavailable")]
    CatalogUnavailable(String),
}
