/// What happened, from the shopper's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Added,
    AlreadyInCart,
    Removed,
    PromoApplied,
    PromoRejected,
    PromoRemoved,
    PromoCodeMissing,
    LoginRequired,
    EmptyCart,
    OrderPlaced,
    CheckoutFailed,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Added => write!(f, "added"),
            NotificationKind::AlreadyInCart => write!(f, "already_in_cart"),
            NotificationKind::Removed => write!(f, "removed"),
            NotificationKind::PromoApplied => write!(f, "promo_applied"),
            NotificationKind::PromoRejected => write!(f, "promo_rejected"),
            NotificationKind::PromoRemoved => write!(f, "promo_removed"),
            NotificationKind::PromoCodeMissing => write!(f, "promo_code_missing"),
            NotificationKind::LoginRequired => write!(f, "login_required"),
            NotificationKind::EmptyCart => write!(f, "empty_cart"),
            NotificationKind::OrderPlaced => write!(f, "order_placed"),
            NotificationKind::CheckoutFailed => write!(f, "checkout_failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A user-facing event raised by the cart session.
///
/// How (and whether) it is rendered is up to the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn added(product_name: &str) -> Self {
        Self::info(
            NotificationKind::Added,
            "Added to cart",
            Some(format!("{} has been added to your cart.", product_name)),
        )
    }

    pub fn already_in_cart() -> Self {
        Self::info(
            NotificationKind::AlreadyInCart,
            "Already in cart",
            Some("This design is already in your cart.".to_string()),
        )
    }

    pub fn removed() -> Self {
        Self::info(
            NotificationKind::Removed,
            "Removed from cart",
            Some("Item has been removed from your cart.".to_string()),
        )
    }

    pub fn promo_applied(description: &str) -> Self {
        Self::info(
            NotificationKind::PromoApplied,
            "Promo Code Applied",
            Some(description.to_string()),
        )
    }

    pub fn promo_rejected(detail: String) -> Self {
        Self::error(NotificationKind::PromoRejected, "Invalid Promo Code", Some(detail))
    }

    pub fn promo_removed() -> Self {
        Self::info(NotificationKind::PromoRemoved, "Promo Code Removed", None)
    }

    pub fn promo_code_missing() -> Self {
        Self::info(
            NotificationKind::PromoCodeMissing,
            "Enter Promo Code",
            Some("Please enter a promo code to apply.".to_string()),
        )
    }

    pub fn login_required() -> Self {
        Self::error(
            NotificationKind::LoginRequired,
            "Login Required",
            Some("Please login to proceed with checkout.".to_string()),
        )
    }

    pub fn empty_cart() -> Self {
        Self::info(
            NotificationKind::EmptyCart,
            "Empty Cart",
            Some("Your cart is empty. Add some items to proceed.".to_string()),
        )
    }

    pub fn order_placed(order_id: &str) -> Self {
        Self::info(
            NotificationKind::OrderPlaced,
            "Order Placed",
            Some(format!("Order {} has been placed.", order_id)),
        )
    }

    pub fn checkout_failed(detail: String) -> Self {
        Self::error(NotificationKind::CheckoutFailed, "Checkout Failed", Some(detail))
    }

    fn info(kind: NotificationKind, title: &str, description: Option<String>) -> Self {
        Self {
            kind,
            level: NotificationLevel::Info,
            title: title.to_string(),
            description,
        }
    }

    fn error(kind: NotificationKind, title: &str, description: Option<String>) -> Self {
        Self {
            kind,
            level: NotificationLevel::Error,
            title: title.to_string(),
            description,
        }
    }
}

/// Notification port. Implemented by the host (toast, console, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mention_product_name_when_added() {
        let notification = Notification::added("Mandala Pack");

        assert_eq!(notification.kind, NotificationKind::Added);
        assert_eq!(
            notification.description.as_deref(),
            Some("Mandala Pack has been added to your cart.")
        );
    }

    #[test]
    fn should_carry_rejection_detail_verbatim() {
        let notification = Notification::promo_rejected("Promo code expired".to_string());

        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.description.as_deref(), Some("Promo code expired"));
    }

    #[test]
    fn should_display_kind_as_snake_case() {
        assert_eq!(NotificationKind::AlreadyInCart.to_string(), "already_in_cart");
        assert_eq!(NotificationKind::CheckoutFailed.to_string(), "checkout_failed");
    }
}
