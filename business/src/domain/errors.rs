/// Durable store errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store.read")]
    Read(#[source] std::io::Error),
    #[error("store.write")]
    Write(#[source] std::io::Error),
    #[error("store.invalid_key")]
    InvalidKey,
}

impl StoreError {
    pub fn read(source: std::io::Error) -> Self {
        StoreError::Read(source)
    }
    pub fn write(source: std::io::Error) -> Self {
        StoreError::Write(source)
    }
    pub fn invalid_key() -> Self {
        StoreError::InvalidKey
    }
}
