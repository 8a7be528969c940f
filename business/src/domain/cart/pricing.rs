use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::model::LineItem;
use crate::domain::promo_code::model::DiscountRule;

/// Derived amounts of a cart. Never stored as the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
}

impl Totals {
    pub fn zero() -> Self {
        Self {
            subtotal: BigDecimal::zero(),
            discount: BigDecimal::zero(),
            total: BigDecimal::zero(),
        }
    }
}

/// Sum of `unit_price * quantity` over every line.
pub fn subtotal(items: &[LineItem]) -> BigDecimal {
    items.iter().map(LineItem::line_total).sum()
}

/// Prices `items` under an optional discount rule.
///
/// Pure: the discount is recomputed from the current subtotal on every call,
/// so a percentage promo follows the cart as it changes.
pub fn price(items: &[LineItem], rule: Option<&DiscountRule>) -> Totals {
    let subtotal = subtotal(items);
    let discount = rule
        .map(|rule| rule.discount_on(&subtotal))
        .unwrap_or_else(BigDecimal::zero);
    let total = &subtotal - &discount;

    Totals {
        subtotal,
        discount,
        total,
    }
}

/// Rounds an amount to two decimals for display.
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.round(2).with_scale(2).to_string()
}
