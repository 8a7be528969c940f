use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::application::cart::writer::DebouncedCartWriter;
use crate::domain::cart::model::{AddItemOutcome, AppliedPromo, Cart, LineItem};
use crate::domain::cart::pricing::Totals;
use crate::domain::cart::store::{CART_STORAGE_KEY, CartStore};
use crate::domain::logger::Logger;
use crate::domain::notifications::{Notification, Notifier};
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderId;
use crate::domain::order::use_cases::place::{PlaceOrderParams, PlaceOrderUseCase};
use crate::domain::product::model::Product;
use crate::domain::promo_code::errors::PromoCodeError;
use crate::domain::promo_code::model::normalize_code;
use crate::domain::promo_code::services::PromoCodeValidator;
use crate::domain::shared::value_objects::{IdentityToken, ProductId};

/// Tuning knobs of a cart session.
#[derive(Debug, Clone)]
pub struct CartSessionConfig {
    /// Quiet period before a burst of changes is written to the store.
    pub persist_debounce: Duration,
    /// Upper bound for a promo code validation round-trip.
    pub promo_timeout: Duration,
}

impl Default for CartSessionConfig {
    fn default() -> Self {
        Self {
            persist_debounce: Duration::from_millis(300),
            promo_timeout: Duration::from_secs(30),
        }
    }
}

/// Collaborators a session talks to.
pub struct CartSessionDependencies {
    pub store: Arc<dyn CartStore>,
    pub validator: Arc<dyn PromoCodeValidator>,
    pub place_order: Arc<dyn PlaceOrderUseCase>,
    pub notifier: Arc<dyn Notifier>,
    pub logger: Arc<dyn Logger>,
}

/// The shopper's cart for one session.
///
/// Owned by the host application. All operations take `&self`; the cart
/// sits behind a mutex that is only held for short synchronous sections,
/// never across an await and never while notifying.
///
/// Promo-affecting calls (apply, remove promo, clear, checkout) bump a
/// generation counter. A validation response is only applied if no newer
/// call was initiated while it was in flight, so the last initiated call
/// always decides the final promo state.
pub struct CartSession {
    cart: Mutex<Cart>,
    promo_generation: AtomicU64,
    validator: Arc<dyn PromoCodeValidator>,
    place_order: Arc<dyn PlaceOrderUseCase>,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
    writer: DebouncedCartWriter,
    config: CartSessionConfig,
}

impl CartSession {
    /// Starts a session from whatever the store holds.
    ///
    /// Missing, unreadable or corrupt data yields an empty cart.
    pub async fn restore(deps: CartSessionDependencies, config: CartSessionConfig) -> Self {
        let cart = match deps.store.get(CART_STORAGE_KEY).await {
            Ok(Some(bytes)) => match Cart::decode(&bytes) {
                Ok(cart) => {
                    deps.logger.info(&format!(
                        "Restored cart with {} item(s)",
                        cart.items().len()
                    ));
                    cart
                }
                Err(e) => {
                    deps.logger
                        .warn(&format!("Stored cart is unreadable, starting empty: {}", e));
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                deps.logger
                    .warn(&format!("Could not read stored cart, starting empty: {}", e));
                Cart::new()
            }
        };

        Self::with_cart(cart, deps, config)
    }

    /// Starts a session from an explicit cart, without reading the store.
    pub fn with_cart(cart: Cart, deps: CartSessionDependencies, config: CartSessionConfig) -> Self {
        let writer = DebouncedCartWriter::spawn(
            deps.store,
            CART_STORAGE_KEY,
            config.persist_debounce,
            deps.logger.clone(),
        );

        Self {
            cart: Mutex::new(cart),
            promo_generation: AtomicU64::new(0),
            validator: deps.validator,
            place_order: deps.place_order,
            notifier: deps.notifier,
            logger: deps.logger,
            writer,
            config,
        }
    }

    pub fn items(&self) -> Vec<LineItem> {
        self.lock().items().to_vec()
    }

    pub fn promo_code(&self) -> Option<String> {
        self.lock().promo_code().map(str::to_string)
    }

    pub fn promo(&self) -> Option<AppliedPromo> {
        self.lock().promo().cloned()
    }

    pub fn totals(&self) -> Totals {
        self.lock().totals()
    }

    pub fn cart(&self) -> Cart {
        self.lock().clone()
    }

    pub fn add_item(&self, product: &Product) -> AddItemOutcome {
        self.add_item_with_quantity(product, 1)
    }

    /// Adds a product line; duplicates are rejected and zero removes.
    pub fn add_item_with_quantity(&self, product: &Product, quantity: u32) -> AddItemOutcome {
        let outcome = {
            let mut cart = self.lock();
            let outcome = cart.add(product, quantity);
            if matches!(outcome, AddItemOutcome::Added | AddItemOutcome::Removed) {
                self.persist(&cart);
            }
            outcome
        };

        match outcome {
            AddItemOutcome::Added => {
                self.logger
                    .debug(&format!("Added {} x{} to cart", product.id, quantity));
                self.notifier.notify(Notification::added(&product.name));
            }
            AddItemOutcome::AlreadyInCart => {
                self.logger
                    .debug(&format!("Product {} already in cart, skipping", product.id));
                self.notifier.notify(Notification::already_in_cart());
            }
            AddItemOutcome::Removed => {
                self.logger
                    .debug(&format!("Removed {} from cart (quantity 0)", product.id));
                self.notifier.notify(Notification::removed());
            }
            AddItemOutcome::Ignored => {}
        }

        outcome
    }

    /// Removes the product's line. Returns `false` (silently) when absent.
    pub fn remove_item(&self, product_id: &ProductId) -> bool {
        let removed = {
            let mut cart = self.lock();
            let removed = cart.remove(product_id).is_some();
            if removed {
                self.persist(&cart);
            }
            removed
        };

        if removed {
            self.logger
                .debug(&format!("Removed {} from cart", product_id));
            self.notifier.notify(Notification::removed());
        }

        removed
    }

    pub fn clear_cart(&self) {
        let mut cart = self.lock();
        self.promo_generation.fetch_add(1, Ordering::SeqCst);
        cart.clear();
        self.persist(&cart);
        self.logger.debug("Cart cleared");
    }

    /// Validates `code` remotely and applies it.
    ///
    /// Promo code and discount change together or not at all. On failure any
    /// previously applied code is dropped.
    pub async fn apply_promo_code(&self, code: &str) -> Result<AppliedPromo, PromoCodeError> {
        let code = normalize_code(code);
        if code.is_empty() {
            self.notifier.notify(Notification::promo_code_missing());
            return Err(PromoCodeError::Empty);
        }

        let generation = self.promo_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.logger
            .info(&format!("Validating promo code {} (request {})", code, generation));

        let result = match tokio::time::timeout(
            self.config.promo_timeout,
            self.validator.validate(&code),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(PromoCodeError::Timeout),
        };

        let mut cart = self.lock();
        if self.promo_generation.load(Ordering::SeqCst) != generation {
            drop(cart);
            self.logger.debug(&format!(
                "Discarding stale promo response for {} (request {})",
                code, generation
            ));
            return Err(PromoCodeError::Superseded);
        }

        match result {
            Ok(validation) => {
                let applied = AppliedPromo {
                    code,
                    rule: validation.rule,
                    description: validation.description,
                };
                cart.apply_promo(applied.clone());
                self.persist(&cart);
                drop(cart);

                self.logger
                    .info(&format!("Promo code {} applied: {}", applied.code, applied.rule));
                self.notifier
                    .notify(Notification::promo_applied(&applied.description));
                Ok(applied)
            }
            Err(e) => {
                if cart.clear_promo().is_some() {
                    self.persist(&cart);
                }
                drop(cart);

                self.logger
                    .warn(&format!("Promo code {} rejected: {}", code, e));
                self.notifier.notify(Notification::promo_rejected(e.detail()));
                Err(e)
            }
        }
    }

    pub fn remove_promo_code(&self) {
        {
            let mut cart = self.lock();
            self.promo_generation.fetch_add(1, Ordering::SeqCst);
            if cart.clear_promo().is_some() {
                self.persist(&cart);
            }
        }

        self.notifier.notify(Notification::promo_removed());
    }

    /// Places an order for the current cart.
    ///
    /// On success the ordered lines and the promo code are removed.
    pub async fn checkout(
        &self,
        identity: Option<&IdentityToken>,
        payment_id: &str,
    ) -> Result<OrderId, OrderError> {
        let (items, amount) = {
            let cart = self.lock();
            (cart.items().to_vec(), cart.totals().total)
        };
        let ordered: Vec<ProductId> = items.iter().map(|item| item.product_id.clone()).collect();

        let params = PlaceOrderParams {
            identity: identity.cloned(),
            items,
            amount,
            payment_id: payment_id.to_string(),
        };

        match self.place_order.execute(params).await {
            Ok(order_id) => {
                {
                    // Lines added while the order was in flight stay in the cart.
                    let mut cart = self.lock();
                    self.promo_generation.fetch_add(1, Ordering::SeqCst);
                    for product_id in &ordered {
                        cart.remove(product_id);
                    }
                    cart.clear_promo();
                    self.persist(&cart);
                }
                self.notifier
                    .notify(Notification::order_placed(order_id.as_str()));
                Ok(order_id)
            }
            Err(e) => {
                let notification = match &e {
                    OrderError::LoginRequired => Notification::login_required(),
                    OrderError::EmptyCart => Notification::empty_cart(),
                    other => Notification::checkout_failed(other.detail()),
                };
                self.notifier.notify(notification);
                Err(e)
            }
        }
    }

    /// Writes pending changes to the store now.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Ends the session: final flush, then the writer stops.
    pub async fn shutdown(self) {
        self.writer.close().await;
        self.logger.info("Cart session closed");
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, cart: &Cart) {
        match cart.encode() {
            Ok(bytes) => self.writer.schedule(bytes),
            Err(e) => self
                .logger
                .error(&format!("Failed to encode cart for persistence: {}", e)),
        }
    }
}
