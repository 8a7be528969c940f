#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.encode")]
    Encode(#[source] serde_json::Error),
    #[error("cart.decode")]
    Decode(#[source] serde_json::Error),
}
