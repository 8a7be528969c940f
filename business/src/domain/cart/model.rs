use std::collections::HashSet;

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::errors::CartError;
use super::pricing::{self, Totals};
use crate::domain::product::model::Product;
use crate::domain::promo_code::model::DiscountRule;
use crate::domain::shared::value_objects::ProductId;

/// One product in the cart, with the product attributes captured at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity: u32,
}

impl LineItem {
    /// Copies the denormalized fields of `product`; nothing else is kept.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price.clone(),
            image_ref: product.image_url.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// The promo code currently applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPromo {
    pub code: String,
    pub rule: DiscountRule,
    pub description: String,
}

/// Result of an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddItemOutcome {
    Added,
    /// The product already has a line; the line was left untouched.
    AlreadyInCart,
    /// Quantity zero on a present product.
    Removed,
    /// Quantity zero on an absent product.
    Ignored,
}

/// Items a shopper intends to purchase plus an optional promo code.
///
/// Line order is insertion order. At most one line per product and no line
/// with a zero quantity; subtotal, discount and total are always derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    promo: Option<AppliedPromo>,
}

#[derive(Serialize, Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default, rename = "promoCode")]
    promo: Option<AppliedPromo>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    pub fn promo_code(&self) -> Option<&str> {
        self.promo.as_ref().map(|promo| promo.code.as_str())
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    pub fn totals(&self) -> Totals {
        pricing::price(&self.items, self.promo.as_ref().map(|promo| &promo.rule))
    }

    /// Adds `product` unless it already has a line.
    ///
    /// A zero quantity means "remove".
    pub fn add(&mut self, product: &Product, quantity: u32) -> AddItemOutcome {
        if quantity == 0 {
            return match self.remove(&product.id) {
                Some(_) => AddItemOutcome::Removed,
                None => AddItemOutcome::Ignored,
            };
        }

        if self.contains(&product.id) {
            return AddItemOutcome::AlreadyInCart;
        }

        self.items.push(LineItem::from_product(product, quantity));
        AddItemOutcome::Added
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Option<LineItem> {
        let position = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)?;
        Some(self.items.remove(position))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.promo = None;
    }

    pub fn apply_promo(&mut self, promo: AppliedPromo) {
        self.promo = Some(promo);
    }

    pub fn clear_promo(&mut self) -> Option<AppliedPromo> {
        self.promo.take()
    }

    /// Serializes the items and promo code. Totals are recomputed on decode.
    pub fn encode(&self) -> Result<Vec<u8>, CartError> {
        let snapshot = CartSnapshot {
            items: self.items.clone(),
            promo: self.promo.clone(),
        };
        serde_json::to_vec(&snapshot).map_err(CartError::Encode)
    }

    /// Restores a cart written by [`Cart::encode`].
    ///
    /// Lines breaking the cart invariants are dropped: zero quantities,
    /// negative prices, and any repeated product id after its first line.
    pub fn decode(bytes: &[u8]) -> Result<Self, CartError> {
        let snapshot: CartSnapshot = serde_json::from_slice(bytes).map_err(CartError::Decode)?;

        let mut seen = HashSet::new();
        let items = snapshot
            .items
            .into_iter()
            .filter(|item| item.quantity > 0)
            .filter(|item| item.unit_price >= BigDecimal::zero())
            .filter(|item| seen.insert(item.product_id.clone()))
            .collect();

        Ok(Self {
            items,
            promo: snapshot.promo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::model::NewProductProps;
    use proptest::prelude::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(NewProductProps::basic(id, format!("Item {}", id), BigDecimal::from(price)))
            .unwrap()
    }

    fn ten_percent() -> AppliedPromo {
        AppliedPromo {
            code: "SAVE10".to_string(),
            rule: DiscountRule::Percentage(BigDecimal::from(10)),
            description: "10% off".to_string(),
        }
    }

    #[test]
    fn should_add_items_and_sum_subtotal() {
        let mut cart = Cart::new();

        assert_eq!(cart.add(&product("1", 100), 1), AddItemOutcome::Added);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.totals().subtotal, BigDecimal::from(100));

        assert_eq!(cart.add(&product("2", 200), 1), AddItemOutcome::Added);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.totals().subtotal, BigDecimal::from(300));
    }

    #[test]
    fn should_remove_item_and_update_subtotal() {
        let mut cart = Cart::new();
        cart.add(&product("1", 100), 1);
        cart.add(&product("2", 200), 1);

        let removed = cart.remove(&ProductId::new("1"));

        assert!(removed.is_some());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id.as_str(), "2");
        assert_eq!(cart.totals().subtotal, BigDecimal::from(200));
    }

    #[test]
    fn should_ignore_zero_quantity_on_empty_cart() {
        let mut cart = Cart::new();

        assert_eq!(cart.add(&product("1", 100), 0), AddItemOutcome::Ignored);
        assert!(cart.is_empty());
        assert_eq!(cart.totals().subtotal, BigDecimal::zero());
    }

    #[test]
    fn should_reject_duplicate_without_incrementing() {
        let mut cart = Cart::new();
        cart.add(&product("1", 100), 1);

        assert_eq!(cart.add(&product("1", 100), 3), AddItemOutcome::AlreadyInCart);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.totals().subtotal, BigDecimal::from(100));
    }

    #[test]
    fn should_treat_zero_quantity_as_removal() {
        let mut added_then_zeroed = Cart::new();
        added_then_zeroed.add(&product("1", 100), 1);
        added_then_zeroed.add(&product("2", 200), 1);
        let mut removed = added_then_zeroed.clone();

        assert_eq!(
            added_then_zeroed.add(&product("1", 100), 0),
            AddItemOutcome::Removed
        );
        removed.remove(&ProductId::new("1"));

        assert_eq!(added_then_zeroed.items(), removed.items());
    }

    #[test]
    fn should_not_copy_extra_product_fields() {
        let mut props = NewProductProps::basic("7", "Floral SVG", BigDecimal::from(49));
        props.image_url = Some("https://cdn.example/floral.png".to_string());
        props.category = Some("svg".to_string());
        props.description = Some("Hand drawn".to_string());
        props.download_url = Some("https://files.example/floral.zip".to_string());
        let product = Product::new(props).unwrap();

        let line = LineItem::from_product(&product, 1);
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(line.image_ref.as_deref(), Some("https://cdn.example/floral.png"));
        assert_eq!(line.category.as_deref(), Some("svg"));
        assert!(json.get("description").is_none());
        assert!(json.get("downloadUrl").is_none());
    }

    #[test]
    fn should_recompute_discount_after_removal() {
        let mut cart = Cart::new();
        cart.add(&product("1", 100), 1);
        cart.add(&product("2", 200), 1);
        cart.apply_promo(ten_percent());

        assert_eq!(cart.totals().discount, BigDecimal::from(30));
        assert_eq!(cart.totals().total, BigDecimal::from(270));

        cart.remove(&ProductId::new("1"));

        assert_eq!(cart.totals().discount, BigDecimal::from(20));
        assert_eq!(cart.totals().total, BigDecimal::from(180));
    }

    #[test]
    fn should_reset_everything_on_clear() {
        let mut cart = Cart::new();
        cart.add(&product("1", 100), 1);
        cart.apply_promo(ten_percent());

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.promo_code().is_none());
        assert_eq!(cart.totals(), Totals::zero());
    }

    #[test]
    fn should_round_trip_items_and_promo_code() {
        let mut cart = Cart::new();
        cart.add(&product("1", 100), 2);
        cart.add(&product("2", 200), 1);
        cart.apply_promo(ten_percent());

        let restored = Cart::decode(&cart.encode().unwrap()).unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.promo_code(), Some("SAVE10"));
        assert_eq!(restored.totals(), cart.totals());
    }

    #[test]
    fn should_fail_decoding_garbage() {
        let result = Cart::decode(b"{not json");

        assert!(matches!(result.unwrap_err(), CartError::Decode(_)));
    }

    #[test]
    fn should_restore_invariants_when_decoding() {
        let stored = br#"{
            "items": [
                {"productId": "1", "name": "Item 1", "unitPrice": "100", "quantity": 1},
                {"productId": "2", "name": "Item 2", "unitPrice": "200", "quantity": 0},
                {"productId": "1", "name": "Item 1 again", "unitPrice": "100", "quantity": 4},
                {"productId": "3", "name": "Broken", "unitPrice": "-5", "quantity": 1}
            ],
            "promoCode": null
        }"#;

        let cart = Cart::decode(stored).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].name, "Item 1");
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn should_decode_empty_object_as_empty_cart() {
        let cart = Cart::decode(b"{}").unwrap();

        assert_eq!(cart, Cart::new());
    }

    proptest! {
        #[test]
        fn adds_never_duplicate_a_product(
            adds in proptest::collection::vec((0u8..6, 0u32..4), 0..40),
        ) {
            let mut cart = Cart::new();
            for (id, quantity) in &adds {
                cart.add(&product(&id.to_string(), 10), *quantity);
            }

            let mut ids: Vec<&ProductId> = cart.items().iter().map(|i| &i.product_id).collect();
            let count = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), count);
            prop_assert!(cart.items().iter().all(|item| item.quantity > 0));
        }
    }
}
