use async_trait::async_trait;

use super::errors::PromoCodeError;
use super::model::PromoValidation;

/// Service port for the remote promo code validation.
///
/// Receives an already trimmed and uppercased code.
#[async_trait]
pub trait PromoCodeValidator: Send + Sync {
    async fn validate(&self, code: &str) -> Result<PromoValidation, PromoCodeError>;
}
