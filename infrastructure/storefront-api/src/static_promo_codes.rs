use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;

use business::domain::promo_code::errors::PromoCodeError;
use business::domain::promo_code::model::{DiscountRule, PromoCode, PromoValidation};
use business::domain::promo_code::services::PromoCodeValidator;

const NOT_FOUND_MESSAGE: &str = "Invalid or expired promo code";
const EXPIRED_MESSAGE: &str = "Promo code expired";

/// Offline validator over a fixed table of promo codes.
///
/// Answers the way the promo service does, without a network round-trip.
pub struct StaticPromoCodeValidator {
    codes: Vec<PromoCode>,
}

impl StaticPromoCodeValidator {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        Self { codes }
    }

    /// The storefront's built-in codes.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            PromoCode::new(
                "SAVE10",
                DiscountRule::Percentage(BigDecimal::from(10)),
                "10% off your order",
            ),
            PromoCode::new(
                "SHREE200",
                DiscountRule::FixedAmount(BigDecimal::from(200)),
                "₹200 off your order",
            ),
        ])
    }
}

#[async_trait]
impl PromoCodeValidator for StaticPromoCodeValidator {
    async fn validate(&self, code: &str) -> Result<PromoValidation, PromoCodeError> {
        let promo = self
            .codes
            .iter()
            .find(|promo| promo.active && promo.matches(code))
            .ok_or_else(|| PromoCodeError::Rejected(NOT_FOUND_MESSAGE.to_string()))?;

        if promo.is_expired(Utc::now()) {
            return Err(PromoCodeError::Rejected(EXPIRED_MESSAGE.to_string()));
        }

        Ok(promo.to_validation())
    }
}
