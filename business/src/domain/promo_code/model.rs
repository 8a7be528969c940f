use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

const HUNDRED: u32 = 100;

/// How a promo code reduces the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountRule {
    /// Percentage of the current subtotal, recomputed on every change.
    Percentage(BigDecimal),
    /// Absolute amount, never more than the subtotal.
    FixedAmount(BigDecimal),
}

impl DiscountRule {
    /// Discount this rule grants on `subtotal`. Always within `0..=subtotal`.
    pub fn discount_on(&self, subtotal: &BigDecimal) -> BigDecimal {
        let zero = BigDecimal::zero();
        if *subtotal <= zero {
            return zero;
        }

        match self {
            DiscountRule::Percentage(percent) => {
                let percent = percent.clone().clamp(zero, BigDecimal::from(HUNDRED));
                subtotal.clone() * percent / BigDecimal::from(HUNDRED)
            }
            DiscountRule::FixedAmount(amount) => amount.clone().clamp(zero, subtotal.clone()),
        }
    }
}

impl std::fmt::Display for DiscountRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountRule::Percentage(percent) => write!(f, "{}% off", percent),
            DiscountRule::FixedAmount(amount) => write!(f, "{} off", amount),
        }
    }
}

/// Successful answer of the promo validation service.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoValidation {
    pub rule: DiscountRule,
    pub description: String,
}

/// A promo code as the promo service stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoCode {
    pub code: String,
    pub rule: DiscountRule,
    pub description: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl PromoCode {
    pub fn new(code: &str, rule: DiscountRule, description: impl Into<String>) -> Self {
        Self {
            code: normalize_code(code),
            rule,
            description: description.into(),
            expires_at: None,
            active: true,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Codes are matched case-insensitively.
    pub fn matches(&self, code: &str) -> bool {
        self.code == normalize_code(code)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }

    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired(now)
    }

    pub fn to_validation(&self) -> PromoValidation {
        PromoValidation {
            rule: self.rule.clone(),
            description: self.description.clone(),
        }
    }
}

/// Trims and uppercases free-text input.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
